use std::path::Path;

use csv::ReaderBuilder;

use crate::error::IngestError;

/// Untyped cells of a delimited file, header row split off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file. The first non-blank row is the header; blank rows are
/// dropped and short rows are padded with empty cells.
pub fn read_csv_table(path: &Path) -> Result<RawTable, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| IngestError::parse(path, error))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::parse(path, error))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Ok(RawTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    if let Some(position) = headers.iter().position(String::is_empty) {
        return Err(IngestError::parse(
            path,
            format!("header column {} is empty", position + 1),
        ));
    }
    let mut rows = Vec::new();
    for record in raw_rows {
        if record.len() > headers.len() {
            return Err(IngestError::parse(
                path,
                format!(
                    "row has {} cells but the header declares {} columns",
                    record.len(),
                    headers.len()
                ),
            ));
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}
