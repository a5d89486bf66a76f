//! Error types for the Flora library.
//!
//! Aggregation and validation never fail; these errors cover loading,
//! source selection and request handling around them.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Flora library.
#[derive(Debug, Error)]
pub enum FloraError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // Parsing errors
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    #[error("No CSV content provided")]
    EmptyInput,

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Dataset errors
    #[error("Unknown data source: {id}")]
    UnknownSource { id: String },

    #[error("No dataset is loaded")]
    NoActiveDataset,

    // Request errors
    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Flora operations.
pub type Result<T> = std::result::Result<T, FloraError>;

impl From<std::io::Error> for FloraError {
    fn from(err: std::io::Error) -> Self {
        FloraError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for FloraError {
    fn from(err: serde_json::Error) -> Self {
        FloraError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<csv::Error> for FloraError {
    fn from(err: csv::Error) -> Self {
        FloraError::Csv {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl FloraError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            return FloraError::FileNotFound(path);
        }
        FloraError::Io {
            message: err.to_string(),
            path: Some(path),
            source: Some(err),
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Standard codes:
    /// - -32602: Invalid params
    /// - -32603: Internal error
    ///
    /// Application codes:
    /// - -32001: Unknown data source
    /// - -32002: No dataset loaded
    /// - -32003: Dataset failed to load
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            FloraError::InvalidParams { .. } | FloraError::EmptyInput => -32602,

            FloraError::UnknownSource { .. } => -32001,

            FloraError::NoActiveDataset => -32002,

            FloraError::Io { .. } | FloraError::FileNotFound(_) | FloraError::Csv { .. } => {
                -32003
            }

            _ => -32603,
        }
    }

    /// Load failures can be retried by the dashboard.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FloraError::Io { .. } | FloraError::FileNotFound(_) | FloraError::Csv { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FloraError::UnknownSource {
            id: "nope".into(),
        };
        assert_eq!(err.to_string(), "Unknown data source: nope");
        assert_eq!(FloraError::NoActiveDataset.to_string(), "No dataset is loaded");
    }

    #[test]
    fn test_rpc_error_codes() {
        assert_eq!(
            FloraError::UnknownSource { id: "x".into() }.to_rpc_error_code(),
            -32001
        );
        assert_eq!(FloraError::NoActiveDataset.to_rpc_error_code(), -32002);
        assert_eq!(FloraError::EmptyInput.to_rpc_error_code(), -32602);
        assert_eq!(FloraError::Other("boom".into()).to_rpc_error_code(), -32603);
    }

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = FloraError::io_with_path(io, "/data/table.csv");
        assert!(matches!(err, FloraError::FileNotFound(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(FloraError::Csv {
            message: "bad row".into(),
            source: None
        }
        .is_retryable());
        assert!(!FloraError::NoActiveDataset.is_retryable());
    }
}
