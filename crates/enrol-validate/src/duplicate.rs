use enrol_model::{FieldValue, Record, StoredRecord, fields};

/// How the identity fields of a candidate are matched against stored rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeying {
    /// Parent email, first name and last name each appear somewhere in the
    /// table, not necessarily in the same row.
    #[default]
    AnyRow,
    /// All three identity fields match within one stored row.
    SameRow,
}

fn identity(record: &Record) -> Option<[&FieldValue; 3]> {
    let [email, first, last] = fields::IDENTITY;
    Some([
        record.present(email)?,
        record.present(first)?,
        record.present(last)?,
    ])
}

fn column_contains(existing: &[StoredRecord], field: &str, value: &FieldValue) -> bool {
    existing
        .iter()
        .any(|stored| stored.get(field).is_some_and(|stored| stored.matches(value)))
}

/// Reports whether `candidate` duplicates a committed registration.
///
/// A candidate missing any identity field is never a duplicate, and nothing
/// is a duplicate of an empty table.
pub fn is_duplicate(candidate: &Record, existing: &[StoredRecord], keying: DuplicateKeying) -> bool {
    if existing.is_empty() {
        return false;
    }
    let Some(values) = identity(candidate) else {
        return false;
    };
    match keying {
        DuplicateKeying::AnyRow => fields::IDENTITY
            .iter()
            .zip(values)
            .all(|(field, value)| column_contains(existing, field, value)),
        DuplicateKeying::SameRow => existing.iter().any(|stored| {
            fields::IDENTITY.iter().zip(values).all(|(field, value)| {
                stored.get(field).is_some_and(|stored| stored.matches(value))
            })
        }),
    }
}
