use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use enrol_cli::logging::redact_value;
use enrol_cli::summary::print_report;
use enrol_ingest::IngestOptions;
use enrol_model::Schema;
use enrol_pipeline::{BatchReport, DEFAULT_DATABASE_NAME, PipelineContext, run_bulk_upload};
use enrol_validate::{AgeRange, DuplicateKeying, RuleConfig};

use crate::cli::{SchemaArgs, UploadArgs};

pub struct UploadResult {
    pub context: PipelineContext,
    pub report: BatchReport,
}

pub fn run_upload(args: &UploadArgs) -> Result<UploadResult> {
    if args.min_age > args.max_age {
        bail!(
            "--min-age ({}) must not be greater than --max-age ({})",
            args.min_age,
            args.max_age
        );
    }
    let schema = match &args.schema {
        Some(path) => load_schema(path)?,
        None => Schema::registration(),
    };
    let keying = if args.same_row_duplicates {
        DuplicateKeying::SameRow
    } else {
        DuplicateKeying::AnyRow
    };
    let rules = RuleConfig::default()
        .with_age_range(AgeRange::new(args.min_age, args.max_age))
        .with_duplicate_keying(keying);
    let mut context = PipelineContext::new(DEFAULT_DATABASE_NAME, args.table.as_str(), schema)
        .context("create registry")?
        .with_rules(rules)
        .with_ingest_options(IngestOptions::default().with_sheet_name(args.sheet.as_str()));

    info!(input = %args.input.display(), table = %args.table, "starting upload");
    let report = match run_bulk_upload(&mut context, &args.input) {
        Ok(report) => report,
        Err(error) => {
            if let Some(partial) = error.partial_report() {
                print_report(partial);
            }
            return Err(error).with_context(|| format!("upload {}", args.input.display()));
        }
    };
    for (row, reason) in report.rejections() {
        debug!(row, detail = redact_value(&reason.to_string()), "record rejected");
    }
    Ok(UploadResult { context, report })
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = match &args.schema {
        Some(path) => load_schema(path)?,
        None => Schema::registration(),
    };
    let json = serde_json::to_string_pretty(&schema.to_definition()).context("encode schema")?;
    println!("{json}");
    Ok(())
}

fn load_schema(path: &Path) -> Result<Schema> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("read schema {}", path.display()))?;
    Schema::from_json(&json).with_context(|| format!("load schema {}", path.display()))
}
