//! In-memory cache of derived dashboard views.
//!
//! Entries are keyed by dataset fingerprint, so reloading identical bytes is
//! a hit and any change to the data is a miss. Aggregation itself stays pure.

use crate::aggregation::calculate_summary_statistics;
use crate::charts::derive_chart_series;
use crate::config::CacheSettings;
use crate::models::{ChartSeries, Dataset, SummaryStatistics};
use mini_moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Everything computed from one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedViews {
    pub summary: SummaryStatistics,
    pub charts: ChartSeries,
}

impl DerivedViews {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            summary: calculate_summary_statistics(&dataset.records),
            charts: derive_chart_series(&dataset.records),
        }
    }
}

/// Fingerprint-keyed cache of [`DerivedViews`].
#[derive(Clone)]
pub struct SummaryCache {
    entries: Cache<String, Arc<DerivedViews>>,
}

impl SummaryCache {
    pub fn new(max_entries: u64, time_to_idle: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_entries)
                .time_to_idle(time_to_idle)
                .build(),
        }
    }

    /// Cached views for `dataset`, computing them on a miss.
    pub fn get_or_compute(&self, dataset: &Dataset) -> Arc<DerivedViews> {
        if let Some(views) = self.entries.get(&dataset.fingerprint) {
            debug!("Summary cache hit for {}", short(&dataset.fingerprint));
            return views;
        }

        debug!(
            "Summary cache miss for {}, aggregating {} records",
            short(&dataset.fingerprint),
            dataset.len()
        );
        let views = Arc::new(DerivedViews::compute(dataset));
        self.entries
            .insert(dataset.fingerprint.clone(), Arc::clone(&views));
        views
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.entries.contains_key(&fingerprint.to_string())
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(CacheSettings::MAX_ENTRIES, CacheSettings::TIME_TO_IDLE)
    }
}

fn short(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
