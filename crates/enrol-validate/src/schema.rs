use enrol_model::{FieldType, FieldValue, Record, RecordError, Schema};

fn matches_type(value: &FieldValue, expected: FieldType) -> bool {
    match expected {
        FieldType::String => matches!(value, FieldValue::Text(_)),
        FieldType::Integer => value.as_integer().is_some(),
    }
}

/// Checks that `record` is a structurally valid instance of `schema`.
///
/// Required fields are checked first, in the order the schema lists them,
/// then every declared property the record carries is type-checked in
/// declaration order. The first failure is returned. Fields the schema does
/// not declare are ignored.
pub fn validate_record(record: &Record, schema: &Schema) -> Result<(), RecordError> {
    for field in schema.required() {
        if record.present(field).is_none() {
            return Err(RecordError::validation(
                field.as_str(),
                format!("'{field}' is a required property"),
            ));
        }
    }

    for (name, expected) in schema.properties() {
        let Some(value) = record.present(name) else {
            continue;
        };
        if !matches_type(value, expected) {
            return Err(RecordError::validation(
                name,
                format!(
                    "'{name}': {} '{value}' is not of type '{expected}'",
                    value.type_name()
                ),
            ));
        }
    }

    Ok(())
}
