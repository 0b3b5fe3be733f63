//! Domain rules a registration must satisfy after it passes the schema.

use std::sync::LazyLock;

use regex::Regex;

use enrol_model::{FieldValue, Record, RecordError, fields};

use crate::duplicate::DuplicateKeying;

/// `local@domain.tld`: at least three ASCII alphanumerics, a lowercase
/// domain, and a lowercase top-level segment of one to three letters.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{3,}@[a-z]+\.[a-z]{1,3}$").expect("valid email regex")
});

/// Closed age interval a child must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i64,
    pub max: i64,
}

impl AgeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: i64) -> bool {
        age >= self.min && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 5, max: 15 }
    }
}

/// Options controlling which registrations are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub age_range: AgeRange,
    pub duplicate_keying: DuplicateKeying,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age_range(mut self, age_range: AgeRange) -> Self {
        self.age_range = age_range;
        self
    }

    pub fn with_duplicate_keying(mut self, keying: DuplicateKeying) -> Self {
        self.duplicate_keying = keying;
        self
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Age must be an integer inside `range`. Anything that is not an integer
/// cannot be in range and is reported the same way.
pub fn check_age(record: &Record, range: &AgeRange) -> Result<(), RecordError> {
    let value = record.get(fields::AGE);
    match value.and_then(FieldValue::as_integer) {
        Some(age) if range.contains(age) => Ok(()),
        _ => Err(RecordError::AgeOutOfRange {
            value: value.map(ToString::to_string).unwrap_or_default(),
            min: range.min,
            max: range.max,
        }),
    }
}

pub fn check_email(record: &Record) -> Result<(), RecordError> {
    match record.text(fields::PARENT_EMAIL) {
        Some(email) if is_valid_email(email) => Ok(()),
        _ => Err(RecordError::InvalidEmail {
            value: record
                .get(fields::PARENT_EMAIL)
                .map(ToString::to_string)
                .unwrap_or_default(),
        }),
    }
}
