//! Per-column type inference for delimited input.
//!
//! Delimited files carry no types, so each column is typed as a whole: a
//! column whose non-empty cells all parse as integers is an integer column,
//! and so on. Empty cells are always [`FieldValue::Missing`].

use enrol_model::{FieldValue, Record};

use crate::csv_table::RawTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut non_empty = 0usize;
    let mut integers = 0usize;
    let mut floats = 0usize;
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        non_empty += 1;
        if parse_i64(trimmed).is_some() {
            integers += 1;
            floats += 1;
        } else if parse_f64(trimmed).is_some_and(f64::is_finite) {
            floats += 1;
        }
    }
    if non_empty > 0 && integers == non_empty {
        ColumnType::Integer
    } else if non_empty > 0 && floats == non_empty {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn typed_value(raw: &str, column_type: ColumnType) -> FieldValue {
    if raw.trim().is_empty() {
        return FieldValue::Missing;
    }
    match column_type {
        ColumnType::Integer => parse_i64(raw).map_or(FieldValue::Missing, FieldValue::Integer),
        ColumnType::Float => parse_f64(raw).map_or(FieldValue::Missing, FieldValue::Float),
        ColumnType::Text => FieldValue::Text(raw.to_string()),
    }
}

/// Converts raw rows into records, typing each column from its contents.
pub fn typed_records(table: &RawTable) -> Vec<Record> {
    let column_types: Vec<ColumnType> = (0..table.headers.len())
        .map(|col_idx| {
            infer_column_type(
                table
                    .rows
                    .iter()
                    .map(|row| row.get(col_idx).map(String::as_str).unwrap_or("")),
            )
        })
        .collect();
    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .zip(&column_types)
                .enumerate()
                .map(|(col_idx, (header, column_type))| {
                    let raw = row.get(col_idx).map(String::as_str).unwrap_or("");
                    (header.clone(), typed_value(raw, *column_type))
                })
                .collect()
        })
        .collect()
}
