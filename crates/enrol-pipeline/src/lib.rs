//! Bulk registration pipeline.
//!
//! Records flow one at a time through the checks in a fixed order
//! (duplicate, schema, age, email) and are committed to the context's table
//! when all of them pass.

pub mod context;
pub mod error;
pub mod pipeline;
pub mod report;

pub use context::{DEFAULT_DATABASE_NAME, DEFAULT_TABLE_NAME, PipelineContext};
pub use error::PipelineError;
pub use pipeline::{evaluate_record, process_records, run_bulk_upload};
pub use report::{BatchReport, RecordOutcome, RecordStatus};
