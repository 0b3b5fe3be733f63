use thiserror::Error;

use enrol_ingest::IngestError;
use enrol_store::StoreError;

use crate::report::BatchReport;

/// Failures that stop an upload as a whole. Per-record rejections are not
/// errors; they are collected in the batch report.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Committing row `row` failed. Rows before it stay committed and are
    /// described by `report`.
    #[error("batch stopped at row {row}: {source}")]
    Commit {
        row: usize,
        report: Box<BatchReport>,
        #[source]
        source: StoreError,
    },
}

impl PipelineError {
    /// Outcomes of the rows handled before the batch stopped, if any were.
    pub fn partial_report(&self) -> Option<&BatchReport> {
        match self {
            PipelineError::Commit { report, .. } => Some(report),
            PipelineError::Ingest(_) | PipelineError::Store(_) => None,
        }
    }
}
