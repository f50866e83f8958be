use std::path::Path;
use thiserror::Error;

/// Request-level failures. Per-artifact failures never surface here; they are
/// captured as report text inside an `AnalysisResult`.
#[derive(Debug, Error)]
pub enum CodervetError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("At least one file must be submitted for review")]
    EmptyBatch,

    #[error("'{name}' is not a .zip archive")]
    UnsupportedArchive { name: String },

    #[error("Archive is corrupt or not a valid ZIP file: {reason}")]
    MalformedArchive { reason: String },

    #[error("Review failed for '{filename}': {detail}")]
    ReviewFailed { filename: String, detail: String },

    #[error("System error during {operation}: {reason}")]
    System { operation: String, reason: String },

    #[error("File operation '{operation}' failed for '{path}': {source}")]
    FileOperation {
        path: String,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl CodervetError {
    pub fn file_error(path: &Path, operation: &str, source: std::io::Error) -> Self {
        Self::FileOperation {
            path: path.display().to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn system_error(operation: &str, reason: impl ToString) -> Self {
        Self::System {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_archive(reason: impl ToString) -> Self {
        Self::MalformedArchive {
            reason: reason.to_string(),
        }
    }
}

pub type CodervetResult<T> = Result<T, CodervetError>;
