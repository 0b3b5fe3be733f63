use enrol_model::{FieldValue, Record, RecordError, RecordId, Schema, StoredRecord};
use enrol_validate::{
    AgeRange, DuplicateKeying, check_age, check_email, is_duplicate, is_valid_email,
    validate_record,
};
use proptest::prelude::*;

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

fn stored(id: &str, record: Record) -> StoredRecord {
    StoredRecord::new(RecordId::new(id), record)
}

#[test]
fn complete_record_passes_schema() {
    let record = child("Ann", "Lee", 9, "abc@de.fg");
    assert_eq!(validate_record(&record, &Schema::registration()), Ok(()));
}

#[test]
fn missing_required_field_is_named() {
    let record = Record::new()
        .with_field("First Name", "Ann")
        .with_field("Last Name", "Lee")
        .with_field("Age", 9_i64);
    let error = validate_record(&record, &Schema::registration()).unwrap_err();
    assert_eq!(
        error,
        RecordError::validation("Gender", "'Gender' is a required property")
    );
}

#[test]
fn missing_cell_counts_as_absent() {
    let mut record = child("Ann", "Lee", 9, "abc@de.fg");
    record.set("State", FieldValue::Missing);
    let error = validate_record(&record, &Schema::registration()).unwrap_err();
    assert!(matches!(error, RecordError::Validation { field, .. } if field == "State"));
}

#[test]
fn wrong_type_names_field_and_value() {
    let mut record = child("Ann", "Lee", 9, "abc@de.fg");
    record.set("Age", "nine");
    let error = validate_record(&record, &Schema::registration()).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("'Age'"), "{message}");
    assert!(message.contains("nine"), "{message}");
    assert!(message.contains("integer"), "{message}");
}

#[test]
fn text_field_holding_a_number_is_rejected() {
    let mut record = child("Ann", "Lee", 9, "abc@de.fg");
    record.set("State", 42_i64);
    assert!(validate_record(&record, &Schema::registration()).is_err());
}

#[test]
fn undeclared_fields_are_allowed() {
    let record = child("Ann", "Lee", 9, "abc@de.fg").with_field("Allergies", "none");
    assert!(validate_record(&record, &Schema::registration()).is_ok());
}

#[test]
fn age_bounds_are_inclusive() {
    let range = AgeRange::default();
    for age in [5, 15] {
        assert!(check_age(&child("Ann", "Lee", age, "abc@de.fg"), &range).is_ok());
    }
    for age in [4, 16] {
        assert!(matches!(
            check_age(&child("Ann", "Lee", age, "abc@de.fg"), &range),
            Err(RecordError::AgeOutOfRange { .. })
        ));
    }
}

#[test]
fn age_range_is_configurable() {
    let record = child("Ann", "Lee", 17, "abc@de.fg");
    assert!(check_age(&record, &AgeRange::default()).is_err());
    assert!(check_age(&record, &AgeRange::new(10, 18)).is_ok());
}

#[test]
fn email_boundaries() {
    assert!(check_email(&child("Ann", "Lee", 9, "abc@de.fg")).is_ok());
    assert!(matches!(
        check_email(&child("Ann", "Lee", 9, "ab@de.fg")),
        Err(RecordError::InvalidEmail { .. })
    ));
    assert!(check_email(&child("Ann", "Lee", 9, "abc@de.fghi")).is_err());
}

// The pattern is deliberately narrow: it turns away addresses many mail
// systems accept.
#[test]
fn email_rule_rejects_dotted_local_parts_and_long_tlds() {
    assert!(!is_valid_email("ann.lee@mail.com.ng"));
    assert!(!is_valid_email("ann-lee@mail.ng"));
    assert!(!is_valid_email("annlee@mail.info"));
    assert!(!is_valid_email("annlee@Mail.ng"));
    assert!(is_valid_email("AnnLee9@mail.ng"));
}

#[test]
fn nothing_duplicates_an_empty_table() {
    let candidate = child("Ann", "Lee", 9, "a@b.c");
    assert!(!is_duplicate(&candidate, &[], DuplicateKeying::AnyRow));
}

#[test]
fn same_identity_is_a_duplicate() {
    let existing = vec![stored("00000001", child("Ann", "Lee", 9, "a@b.c"))];
    let candidate = child("Ann", "Lee", 11, "a@b.c");
    assert!(is_duplicate(&candidate, &existing, DuplicateKeying::AnyRow));
    assert!(is_duplicate(&candidate, &existing, DuplicateKeying::SameRow));
}

// Identity fields are matched column by column, so three unrelated rows can
// together make a candidate look like a duplicate.
#[test]
fn any_row_keying_matches_across_rows() {
    let existing = vec![
        stored("00000001", child("Ann", "Okafor", 9, "x@y.z")),
        stored("00000002", child("Bola", "Lee", 9, "p@q.r")),
        stored("00000003", child("Chi", "Obi", 9, "a@b.c")),
    ];
    let candidate = child("Ann", "Lee", 9, "a@b.c");
    assert!(is_duplicate(&candidate, &existing, DuplicateKeying::AnyRow));
    assert!(!is_duplicate(&candidate, &existing, DuplicateKeying::SameRow));
}

#[test]
fn partial_identity_match_is_not_a_duplicate() {
    let existing = vec![stored("00000001", child("Ann", "Lee", 9, "a@b.c"))];
    let sibling = child("Tobi", "Lee", 7, "a@b.c");
    assert!(!is_duplicate(&sibling, &existing, DuplicateKeying::AnyRow));
}

#[test]
fn candidate_without_identity_fields_is_not_a_duplicate() {
    let existing = vec![stored("00000001", child("Ann", "Lee", 9, "a@b.c"))];
    let candidate = Record::new()
        .with_field("First Name", "Ann")
        .with_field("Last Name", "Lee");
    assert!(!is_duplicate(&candidate, &existing, DuplicateKeying::AnyRow));
}

proptest! {
    #[test]
    fn age_check_agrees_with_range(age in -100i64..100, min in 0i64..20, span in 0i64..20) {
        let range = AgeRange::new(min, min + span);
        let record = child("Ann", "Lee", age, "abc@de.fg");
        let inside = age >= min && age <= min + span;
        prop_assert_eq!(check_age(&record, &range).is_ok(), inside);
    }

    #[test]
    fn well_formed_emails_are_accepted(
        local in "[a-zA-Z0-9]{3,12}",
        domain in "[a-z]{1,10}",
        tld in "[a-z]{1,3}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn short_local_parts_are_rejected(local in "[a-zA-Z0-9]{0,2}") {
        let email = format!("{local}@mail.ng");
        prop_assert!(!is_valid_email(&email));
    }
}
