//! Derived views over the active dataset.

use std::sync::Arc;

use tracing::warn;

use crate::cache::DerivedViews;
use crate::compare::{compare_columns, ColumnComparison, LabelledRecords};
use crate::error::Result;
use crate::models::{ChartSeries, Dataset, SummaryStatistics, ValidationReport};
use crate::table::{self, Filters, SortConfig, TablePage, TableQuery};
use crate::FloraApi;

impl FloraApi {
    async fn views(&self) -> Result<Arc<DerivedViews>> {
        let dataset = self.dataset().await?;
        Ok(self.cache.get_or_compute(&dataset))
    }

    pub async fn summary(&self) -> Result<SummaryStatistics> {
        Ok(self.views().await?.summary.clone())
    }

    pub async fn validation(&self) -> Result<ValidationReport> {
        Ok(self.views().await?.summary.taxonomy_validation.clone())
    }

    pub async fn chart_series(&self) -> Result<ChartSeries> {
        Ok(self.views().await?.charts.clone())
    }

    pub async fn query_table(&self, query: &TableQuery) -> Result<TablePage> {
        let dataset = self.dataset().await?;
        Ok(table::query_table(&dataset.records, &dataset.headers, query))
    }

    pub async fn unique_values(&self, column: &str) -> Result<Vec<String>> {
        let dataset = self.dataset().await?;
        Ok(table::unique_values(&dataset.records, column))
    }

    /// Filtered, sorted records of the active dataset as CSV text.
    pub async fn export_csv(&self, filters: &Filters, sort: &SortConfig) -> Result<String> {
        let dataset = self.dataset().await?;
        let view = table::filter_and_sort(&dataset.records, filters, sort);
        table::export_csv(&dataset.headers, view)
    }

    /// Compare catalog sources column by column.
    ///
    /// With no ids, every catalog source that loads is compared and the rest
    /// are skipped with a warning. Explicit ids must all load.
    pub async fn compare_sources(
        &self,
        ids: &[String],
        columns: &[String],
    ) -> Result<Vec<ColumnComparison>> {
        let mut loaded: Vec<(String, Arc<Dataset>)> = Vec::new();

        if ids.is_empty() {
            for entry in self.catalog.iter() {
                match self.read_catalog_source(&entry.id).await {
                    Ok(dataset) => loaded.push((entry.name.clone(), dataset)),
                    Err(e) => warn!("Skipping {} in comparison: {}", entry.id, e),
                }
            }
        } else {
            for id in ids {
                let name = self.catalog.get(id)?.name.clone();
                loaded.push((name, self.read_catalog_source(id).await?));
            }
        }

        let sources: Vec<LabelledRecords<'_>> = loaded
            .iter()
            .map(|(label, dataset)| LabelledRecords {
                label,
                records: &dataset.records,
            })
            .collect();
        Ok(compare_columns(&sources, columns))
    }
}
