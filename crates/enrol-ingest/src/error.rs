use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole upload before any record is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file format not supported for {path}, supported file formats are: {supported}")]
    UnsupportedFormat { path: PathBuf, supported: String },

    #[error("failed to read {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },
}

impl IngestError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ParseFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
