//! Flora Core - Headless library behind the plant species dashboard.
//!
//! Loads enriched species tables from CSV, aggregates them into summary
//! statistics and chart series, and validates that the taxonomy nests
//! consistently (each genus in one family, each family in one order, and so on).
//! It can be used programmatically without any HTTP/RPC layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use flora_core::FloraApi;
//!
//! #[tokio::main]
//! async fn main() -> flora_core::Result<()> {
//!     let api = FloraApi::new("./competingEnrichedData").await?;
//!
//!     api.select_source("sonnet-chat").await?;
//!     let summary = api.summary().await?;
//!     println!("{} species, {} conservation concern", summary.total_species, summary.conservation_concern);
//!
//!     let report = api.validation().await?;
//!     for violation in &report.hierarchy_violations {
//!         println!("{}", violation.issue);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cache;
pub mod charts;
pub mod compare;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod sources;
pub mod table;
pub mod validation;

mod api;

pub use aggregation::calculate_summary_statistics;
pub use cache::{DerivedViews, SummaryCache};
pub use charts::derive_chart_series;
pub use compare::{ColumnComparison, LabelledRecords};
pub use error::{FloraError, Result};
pub use models::{
    ChartSeries, Dataset, DatasetInfo, HierarchyViolation, Record, SummaryStatistics,
    ValidationReport,
};
pub use sources::{DataSource, FileSource, RecordSource, SourceCatalog, UploadSource};
pub use table::{FilterValue, Filters, SortConfig, SortDirection, TablePage, TableQuery};
pub use validation::validate_taxonomy;

pub use api::FloraApiBuilder;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Main entry point for dashboard data.
///
/// Holds the source catalog, the active dataset snapshot and the summary
/// cache. Share it behind an `Arc`; every method takes `&self`.
pub struct FloraApi {
    data_dir: PathBuf,
    catalog: SourceCatalog,
    active: RwLock<Option<Arc<Dataset>>>,
    cache: SummaryCache,
}

impl FloraApi {
    /// Create a builder for FloraApi.
    pub fn builder(data_dir: impl Into<PathBuf>) -> FloraApiBuilder {
        FloraApiBuilder::new(data_dir)
    }

    /// Create an API over `data_dir` with the default catalog and cache.
    pub async fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(data_dir).build().await
    }

    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }
}
