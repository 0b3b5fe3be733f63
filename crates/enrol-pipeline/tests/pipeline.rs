//! Integration tests for the bulk registration pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use enrol_ingest::IngestError;
use enrol_model::{FieldValue, Record, RecordError, RecordId, RejectKind, Schema};
use enrol_pipeline::{
    PipelineContext, PipelineError, RecordStatus, process_records, run_bulk_upload,
};
use enrol_store::{StoreError, Table};
use enrol_validate::{AgeRange, DuplicateKeying, RuleConfig, validate_record};
use tempfile::TempDir;

const HEADER: &str =
    "First Name,Last Name,Age,Gender,State,Parent Email,Organization Name\n";

fn write_upload(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let mut contents = HEADER.to_string();
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write upload");
    path
}

fn child(first: &str, last: &str, age: i64, email: &str) -> Record {
    Record::new()
        .with_field("First Name", first)
        .with_field("Last Name", last)
        .with_field("Age", age)
        .with_field("Gender", "F")
        .with_field("State", "Lagos")
        .with_field("Parent Email", email)
        .with_field("Organization Name", "Grace Chapel")
}

#[test]
fn duplicate_and_out_of_range_rows_are_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(
        &dir,
        "data.csv",
        &[
            "Ann,Lee,9,F,Lagos,abc@mail.ng,Grace Chapel",
            "Ann,Lee,9,F,Lagos,abc@mail.ng,Grace Chapel",
            "Chi,Obi,20,F,Oyo,chi@mail.ng,Grace Chapel",
        ],
    );
    let mut ctx = PipelineContext::registration();

    let report = run_bulk_upload(&mut ctx, &path).expect("upload");

    assert_eq!(report.total, 3);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.rejected(), 1);
    assert_eq!(
        report.rejections_by_kind().get(&RejectKind::AgeOutOfRange),
        Some(&1)
    );
    let table = ctx.table().expect("table");
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.list_all()[0].get("First Name"),
        Some(&FieldValue::text("Ann"))
    );
    let accepted: Vec<_> = report.accepted_ids().collect();
    assert_eq!(accepted, vec![table.list_all()[0].id()]);
}

#[test]
fn summary_line_counts_only_duplicates() {
    let mut table = Table::new("children", Schema::registration());
    let records = vec![
        child("Ann", "Lee", 9, "abc@mail.ng"),
        child("Ann", "Lee", 9, "abc@mail.ng"),
        child("Chi", "Obi", 9, "bad"),
    ];

    let report = process_records(&mut table, records, &RuleConfig::default()).expect("process");

    insta::assert_snapshot!(report.summary_line(), @"Bulk registration complete, 1 duplicates were found");
    assert_eq!(report.rejected(), 1);
}

#[test]
fn unsupported_upload_processes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(&dir, "data.txt", &["Ann,Lee,9,F,Lagos,abc@mail.ng,Grace Chapel"]);
    let mut ctx = PipelineContext::registration();

    let error = run_bulk_upload(&mut ctx, &path).unwrap_err();

    assert!(matches!(
        error,
        PipelineError::Ingest(IngestError::UnsupportedFormat { .. })
    ));
    assert!(ctx.table().expect("table").is_empty());
}

#[test]
fn unreadable_upload_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let mut ctx = PipelineContext::registration();

    let error = run_bulk_upload(&mut ctx, &dir.path().join("missing.csv")).unwrap_err();

    assert!(matches!(
        error,
        PipelineError::Ingest(IngestError::ParseFailure { .. })
    ));
}

#[test]
fn missing_table_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(&dir, "data.csv", &[]);
    let mut ctx = PipelineContext::registration();
    ctx.table_name = "archive".to_string();

    let error = run_bulk_upload(&mut ctx, &path).unwrap_err();
    assert!(matches!(
        error,
        PipelineError::Store(StoreError::TableNotFound { .. })
    ));
}

#[test]
fn duplicate_check_runs_before_schema_check() {
    let mut table = Table::new("children", Schema::registration());
    let mut incomplete = child("Ann", "Lee", 30, "abc@mail.ng");
    incomplete.set("Gender", FieldValue::Missing);
    let records = vec![child("Ann", "Lee", 9, "abc@mail.ng"), incomplete];

    let report = process_records(&mut table, records, &RuleConfig::default()).expect("process");

    assert_eq!(
        report.outcomes[1].status,
        RecordStatus::Rejected {
            reason: RecordError::Duplicate
        }
    );
}

#[test]
fn checks_report_the_first_failure() {
    let mut table = Table::new("children", Schema::registration());
    let mut missing_state = child("Bola", "Ade", 30, "x");
    missing_state.set("State", FieldValue::Missing);
    let records = vec![
        missing_state,
        child("Chi", "Obi", 30, "x"),
        child("Dayo", "Eze", 9, "x"),
    ];

    let report = process_records(&mut table, records, &RuleConfig::default()).expect("process");

    let kinds: Vec<RejectKind> = report.rejections().map(|(_, reason)| reason.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            RejectKind::Validation,
            RejectKind::AgeOutOfRange,
            RejectKind::InvalidEmail
        ]
    );
    let rows: Vec<usize> = report.rejections().map(|(row, _)| row).collect();
    assert_eq!(rows, vec![1, 2, 3]);
    assert!(table.is_empty());
}

#[test]
fn duplicates_within_one_batch_see_earlier_commits() {
    let mut table = Table::new("children", Schema::registration());
    let records = vec![
        child("Ann", "Lee", 9, "abc@mail.ng"),
        child("Ann", "Lee", 9, "abc@mail.ng"),
        child("Ann", "Lee", 9, "abc@mail.ng"),
    ];

    let report = process_records(&mut table, records, &RuleConfig::default()).expect("process");

    assert_eq!(report.accepted, 1);
    assert_eq!(report.duplicates, 2);
}

// A rejected record is never committed, so it cannot make later rows look
// like duplicates.
#[test]
fn rejected_records_do_not_count_for_duplicates() {
    let mut table = Table::new("children", Schema::registration());
    let records = vec![
        child("Ann", "Lee", 30, "abc@mail.ng"),
        child("Ann", "Lee", 9, "abc@mail.ng"),
    ];

    let report = process_records(&mut table, records, &RuleConfig::default()).expect("process");

    assert_eq!(report.accepted, 1);
    assert_eq!(report.duplicates, 0);
}

#[test]
fn cross_row_identity_is_a_duplicate_by_default() {
    let mut table = Table::new("children", Schema::registration());
    let seed = vec![
        child("Ann", "Okafor", 9, "xyz@mail.ng"),
        child("Bola", "Lee", 9, "pqr@mail.ng"),
        child("Chi", "Obi", 9, "abc@mail.ng"),
    ];
    process_records(&mut table, seed, &RuleConfig::default()).expect("seed");

    let candidate = vec![child("Ann", "Lee", 9, "abc@mail.ng")];
    let any_row = process_records(&mut table, candidate.clone(), &RuleConfig::default())
        .expect("process");
    assert_eq!(any_row.duplicates, 1);

    let strict = RuleConfig::default().with_duplicate_keying(DuplicateKeying::SameRow);
    let same_row = process_records(&mut table, candidate, &strict).expect("process");
    assert_eq!(same_row.accepted, 1);
}

#[test]
fn accepted_records_satisfy_the_schema() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(
        &dir,
        "data.csv",
        &[
            "Ann,Lee,9,F,Lagos,abc@mail.ng,Grace Chapel",
            "Tobi,,12,M,Oyo,tobi@mail.ng,Grace Chapel",
            "Chi,Obi,5,F,Oyo,chi@mail.ng,Grace Chapel",
            "Dayo,Eze,15,M,Kano,dayo@mail.ng,Grace Chapel",
        ],
    );
    let mut ctx = PipelineContext::registration();

    let report = run_bulk_upload(&mut ctx, &path).expect("upload");

    assert_eq!(report.accepted, 3);
    let table = ctx.table().expect("table");
    for stored in table.list_all() {
        assert_eq!(validate_record(stored.record(), table.schema()), Ok(()));
    }
}

#[test]
fn context_rules_are_applied() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(&dir, "data.csv", &["Ann,Lee,17,F,Lagos,abc@mail.ng,Grace Chapel"]);
    let mut ctx = PipelineContext::registration()
        .with_rules(RuleConfig::default().with_age_range(AgeRange::new(10, 18)));

    let report = run_bulk_upload(&mut ctx, &path).expect("upload");
    assert_eq!(report.accepted, 1);
}

#[test]
fn custom_schema_context() {
    let schema = Schema::from_json(
        r#"{"type": "object",
            "properties": {"First Name": {"type": "string"}, "Age": {"type": "integer"},
                           "Parent Email": {"type": "string"}, "Last Name": {"type": "string"}},
            "required": ["First Name", "Age", "Parent Email"]}"#,
    )
    .expect("schema");
    let mut ctx = PipelineContext::new("club", "members", schema).expect("context");
    let table = ctx.database.table_mut("members").expect("table");

    let records = vec![
        Record::new()
            .with_field("First Name", "Ann")
            .with_field("Age", 9_i64)
            .with_field("Parent Email", "abc@mail.ng"),
    ];
    let report = process_records(table, records, &ctx.rules).expect("process");
    assert_eq!(report.accepted, 1);
    assert_eq!(report.table, "members");
}

#[test]
fn failed_commit_keeps_the_partial_report() {
    let mut table =
        Table::with_id_source("children", Schema::registration(), || RecordId::new("0000beef"));
    let records = vec![
        child("Ann", "Lee", 9, "abc@mail.ng"),
        child("Chi", "Obi", 20, "chi@mail.ng"),
        child("Dayo", "Eze", 10, "dayo@mail.ng"),
        child("Tobi", "Ade", 12, "tobi@mail.ng"),
    ];

    let error = process_records(&mut table, records, &RuleConfig::default()).unwrap_err();

    let PipelineError::Commit { row, source, .. } = &error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(*row, 3);
    assert!(matches!(source, StoreError::IdExhausted { .. }));
    let report = error.partial_report().expect("partial report");
    assert_eq!(report.total, 2);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.rejected(), 1);
    assert_eq!(
        report.accepted_ids().map(RecordId::as_str).collect::<Vec<_>>(),
        vec!["0000beef"]
    );
    assert_eq!(table.len(), 1);
}

#[test]
fn rows_are_numbered_among_non_blank_data_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_upload(
        &dir,
        "data.csv",
        &[
            "Ann,Lee,9,F,Lagos,abc@mail.ng,Grace Chapel",
            "",
            "Chi,Obi,20,F,Oyo,chi@mail.ng,Grace Chapel",
        ],
    );
    let mut ctx = PipelineContext::registration();

    let report = run_bulk_upload(&mut ctx, &path).expect("upload");

    let rows: Vec<usize> = report.rejections().map(|(row, _)| row).collect();
    assert_eq!(rows, vec![2]);
    assert_eq!(report.total, 2);
}

#[test]
fn workbook_upload_accepts_whole_number_ages() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../enrol-ingest/tests/fixtures/registrations.xlsx");
    let mut ctx = PipelineContext::registration();

    let report = run_bulk_upload(&mut ctx, &path).expect("upload");

    assert_eq!(report.total, 2);
    assert_eq!(report.accepted, 2);
    let table = ctx.table().expect("table");
    let ages: Vec<Option<i64>> = table
        .list_all()
        .iter()
        .map(|stored| stored.get("Age").and_then(FieldValue::as_integer))
        .collect();
    assert_eq!(ages, vec![Some(9), Some(12)]);
}
