//! Dataset loading and selection.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{FloraError, Result};
use crate::loader::{fingerprint, parse_csv_content};
use crate::models::{Dataset, DatasetInfo};
use crate::sources::{FileSource, RecordSource, UploadSource};
use crate::FloraApi;

impl FloraApi {
    /// Read and normalize a dataset without activating it.
    pub async fn read_dataset(&self, source: &dyn RecordSource) -> Result<Arc<Dataset>> {
        let text = source.read_text().await?;
        let parsed = parse_csv_content(&text)?;
        let dataset = Dataset {
            source_id: source.source_id().to_string(),
            fingerprint: fingerprint(&parsed.headers, &parsed.records),
            headers: parsed.headers,
            records: parsed.records.into(),
            loaded_at: Utc::now(),
        };

        info!(
            "Loaded {} records from {} ({} columns)",
            dataset.len(),
            dataset.source_id,
            dataset.headers.len()
        );
        if parsed.skipped_rows > 0 {
            warn!(
                "{} malformed rows skipped while loading {}",
                parsed.skipped_rows, dataset.source_id
            );
        }

        Ok(Arc::new(dataset))
    }

    /// Read a catalog entry from the data directory without activating it.
    pub async fn read_catalog_source(&self, id: &str) -> Result<Arc<Dataset>> {
        let entry = self.catalog.get(id)?;
        let source = FileSource::from_catalog(entry, &self.data_dir);
        self.read_dataset(&source).await
    }

    /// Load `source` and make it the active dataset.
    ///
    /// On failure the previous dataset stays active.
    pub async fn activate(&self, source: &dyn RecordSource) -> Result<DatasetInfo> {
        let dataset = self.read_dataset(source).await?;
        let info = dataset.info();
        *self.active.write().await = Some(dataset);
        Ok(info)
    }

    /// Switch to a catalog source by id.
    pub async fn select_source(&self, id: &str) -> Result<DatasetInfo> {
        let dataset = self.read_catalog_source(id).await?;
        let info = dataset.info();
        *self.active.write().await = Some(dataset);
        Ok(info)
    }

    /// Replace the active dataset with uploaded CSV text.
    pub async fn load_csv_text(&self, name: &str, content: &str) -> Result<DatasetInfo> {
        let upload = UploadSource::new(name, content);
        info!("Loading uploaded CSV {}", upload.name());
        self.activate(&upload).await
    }

    /// The active snapshot. The lock is released before returning.
    pub async fn dataset(&self) -> Result<Arc<Dataset>> {
        self.active
            .read()
            .await
            .clone()
            .ok_or(FloraError::NoActiveDataset)
    }

    pub async fn dataset_info(&self) -> Result<DatasetInfo> {
        Ok(self.dataset().await?.info())
    }

    pub async fn active_source_id(&self) -> Option<String> {
        self.active
            .read()
            .await
            .as_ref()
            .map(|d| d.source_id.clone())
    }
}
