use std::fmt;

use thiserror::Error;

/// A schema definition that cannot be used to validate records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema root type must be \"object\", got \"{found}\"")]
    NotAnObject { found: String },

    #[error("property '{property}' declares unsupported type \"{found}\"")]
    UnsupportedType { property: String, found: String },

    #[error("property '{property}' is declared more than once")]
    DuplicateProperty { property: String },

    #[error("required field '{field}' has no property declaration")]
    UndeclaredRequired { field: String },

    #[error("required field '{field}' is listed more than once")]
    DuplicateRequired { field: String },

    #[error("invalid schema json: {message}")]
    Json { message: String },
}

/// Why a single input record was not accepted.
///
/// These are recovered per record: the record is skipped and the batch
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("age {value} is not within the age limit ({min}-{max})")]
    AgeOutOfRange { value: String, min: i64, max: i64 },

    #[error("'{value}' is not a valid parent email")]
    InvalidEmail { value: String },

    #[error("record has more than one entry")]
    Duplicate,
}

impl RecordError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RejectKind {
        match self {
            RecordError::Validation { .. } => RejectKind::Validation,
            RecordError::AgeOutOfRange { .. } => RejectKind::AgeOutOfRange,
            RecordError::InvalidEmail { .. } => RejectKind::InvalidEmail,
            RecordError::Duplicate => RejectKind::Duplicate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RejectKind {
    Duplicate,
    Validation,
    AgeOutOfRange,
    InvalidEmail,
}

impl RejectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectKind::Duplicate => "duplicate",
            RejectKind::Validation => "schema",
            RejectKind::AgeOutOfRange => "age",
            RejectKind::InvalidEmail => "email",
        }
    }
}

impl fmt::Display for RejectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
