//! Data source catalog and raw CSV sources.

use crate::config::AppConfig;
use crate::error::{FloraError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named CSV file relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

impl DataSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Ordered list of selectable sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalog {
    sources: Vec<DataSource>,
}

impl SourceCatalog {
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self { sources }
    }

    /// The four enriched species tables shipped with the dashboard.
    pub fn default_catalog() -> Self {
        let table = |suffix: &str| format!("enhanced_species_table_{suffix}.csv");
        Self::new(vec![
            DataSource::new("claude-code", "Claude Code", table("ClaudeCode")),
            DataSource::new("chatgpt-agent", "ChatGPT Agent", table("ChatGPTAgent")),
            DataSource::new("og-sonnet", "Original Sonnet", table("ogSonnet")),
            DataSource::new("sonnet-chat", "Sonnet Chat", table("SonnetChat")),
        ])
    }

    pub fn get(&self, id: &str) -> Result<&DataSource> {
        self.sources
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| FloraError::UnknownSource { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sources.iter().any(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Default source id when present, else the first entry.
    pub fn default_id(&self) -> Option<&str> {
        if self.contains(AppConfig::DEFAULT_SOURCE_ID) {
            return Some(AppConfig::DEFAULT_SOURCE_ID);
        }
        self.sources.first().map(|s| s.id.as_str())
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

/// Anything that can produce raw CSV text for a dataset.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Id recorded on the loaded dataset.
    fn source_id(&self) -> &str;

    /// Read the full CSV text.
    async fn read_text(&self) -> Result<String>;
}

/// A catalog entry read from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    id: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Resolve a catalog entry against `data_dir`.
    pub fn from_catalog(source: &DataSource, data_dir: &Path) -> Self {
        Self::new(source.id.clone(), data_dir.join(&source.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    async fn read_text(&self) -> Result<String> {
        debug!("Reading CSV source {} from {}", self.id, self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FloraError::io_with_path(e, &self.path))
    }
}

/// CSV text handed over by the user.
#[derive(Debug, Clone)]
pub struct UploadSource {
    name: String,
    content: String,
}

impl UploadSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl RecordSource for UploadSource {
    fn source_id(&self) -> &str {
        AppConfig::UPLOAD_SOURCE_ID
    }

    async fn read_text(&self) -> Result<String> {
        if self.content.trim().is_empty() {
            return Err(FloraError::EmptyInput);
        }
        Ok(self.content.clone())
    }
}
