use std::path::Path;
use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};

use enrol_ingest::read_records;
use enrol_model::{Record, RecordError};
use enrol_store::Table;
use enrol_validate::{RuleConfig, check_age, check_email, is_duplicate, validate_record};

use crate::context::PipelineContext;
use crate::error::PipelineError;
use crate::report::{BatchReport, RecordStatus};

/// Runs every check against `record` in the fixed order duplicate, schema,
/// age, email, stopping at the first failure.
///
/// The duplicate check only looks at records already committed to `table`.
pub fn evaluate_record(record: &Record, table: &Table, rules: &RuleConfig) -> Result<(), RecordError> {
    if !table.is_empty() && is_duplicate(record, table.list_all(), rules.duplicate_keying) {
        return Err(RecordError::Duplicate);
    }
    validate_record(record, table.schema())?;
    check_age(record, &rules.age_range)?;
    check_email(record)?;
    Ok(())
}

/// Drives `records` through the checks one at a time, committing each
/// accepted record before the next one is looked at.
///
/// Rejected records are skipped and reported. A failed commit stops the
/// batch with [`PipelineError::Commit`], which carries the report for the
/// rows handled so far.
pub fn process_records(
    table: &mut Table,
    records: Vec<Record>,
    rules: &RuleConfig,
) -> Result<BatchReport, PipelineError> {
    let start = Instant::now();
    let mut report = BatchReport::new(table.name());
    for (idx, record) in records.into_iter().enumerate() {
        let row = idx + 1;
        let status = match evaluate_record(&record, table, rules) {
            Ok(()) => {
                let id = match table.insert(record) {
                    Ok(stored) => stored.id().clone(),
                    Err(source) => {
                        error!(row, error = %source, "commit failed, stopping batch");
                        return Err(PipelineError::Commit {
                            row,
                            report: Box::new(report),
                            source,
                        });
                    }
                };
                debug!(row, id = %id, "record accepted");
                RecordStatus::Accepted { id }
            }
            Err(reason) => {
                warn!(row, reason = %reason.kind(), "record rejected");
                RecordStatus::Rejected { reason }
            }
        };
        report.record(row, status);
    }
    info!(
        table = %report.table,
        total = report.total,
        accepted = report.accepted,
        duplicates = report.duplicates,
        rejected = report.rejected(),
        duration_ms = start.elapsed().as_millis(),
        "bulk registration complete"
    );
    Ok(report)
}

/// Parses the upload at `path` and processes it into the context's table.
///
/// An unreadable or unsupported file fails before any record is processed.
pub fn run_bulk_upload(ctx: &mut PipelineContext, path: &Path) -> Result<BatchReport, PipelineError> {
    let span = info_span!("upload", path = %path.display(), table = %ctx.table_name);
    let _guard = span.enter();
    let records = read_records(path, &ctx.ingest)?;
    let table = ctx.database.table_mut(&ctx.table_name)?;
    process_records(table, records, &ctx.rules)
}
