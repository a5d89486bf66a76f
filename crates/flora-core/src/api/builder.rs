//! Builder for configuring FloraApi initialization.

use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::cache::SummaryCache;
use crate::config::CacheSettings;
use crate::error::{FloraError, Result};
use crate::sources::SourceCatalog;
use crate::FloraApi;

/// Builder for configuring FloraApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use flora_core::FloraApi;
/// use std::time::Duration;
///
/// let api = FloraApi::builder("./competingEnrichedData")
///     .cache_capacity(4)
///     .cache_ttl(Duration::from_secs(600))
///     .build()
///     .await?;
/// ```
pub struct FloraApiBuilder {
    data_dir: PathBuf,
    cache_capacity: u64,
    cache_ttl: Duration,
    catalog: SourceCatalog,
}

impl FloraApiBuilder {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_capacity: CacheSettings::MAX_ENTRIES,
            cache_ttl: CacheSettings::TIME_TO_IDLE,
            catalog: SourceCatalog::default_catalog(),
        }
    }

    /// Maximum number of datasets whose derived views are kept.
    ///
    /// Default: [`CacheSettings::MAX_ENTRIES`]
    pub fn cache_capacity(mut self, entries: u64) -> Self {
        self.cache_capacity = entries;
        self
    }

    /// Idle time before a cached entry is dropped.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Replace the default source catalog.
    pub fn sources(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build the FloraApi instance.
    ///
    /// The data directory must exist; individual source files are only
    /// checked when selected.
    pub async fn build(self) -> Result<FloraApi> {
        let is_dir = tokio::fs::metadata(&self.data_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(FloraError::Config {
                message: format!("Data directory does not exist: {}", self.data_dir.display()),
            });
        }

        if self.cache_capacity == 0 {
            return Err(FloraError::Config {
                message: "Cache capacity must be at least 1".to_string(),
            });
        }

        tracing::debug!(
            "Initialized FloraApi at {} with {} sources",
            self.data_dir.display(),
            self.catalog.len()
        );

        Ok(FloraApi {
            data_dir: self.data_dir,
            catalog: self.catalog,
            active: RwLock::new(None),
            cache: SummaryCache::new(self.cache_capacity, self.cache_ttl),
        })
    }
}
