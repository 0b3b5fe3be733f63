use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use enrol_model::{FieldValue, Record};

use crate::error::IngestError;

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Empty | Data::Error(_) => FieldValue::Missing,
        Data::Int(value) => FieldValue::Integer(*value),
        Data::Float(value) => FieldValue::Float(*value),
        Data::Bool(value) => FieldValue::Boolean(*value),
        Data::String(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                FieldValue::Missing
            } else {
                FieldValue::Text(trimmed.to_string())
            }
        }
        other => FieldValue::Text(other.to_string()),
    }
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| cell_value(cell).is_missing())
}

/// Reads one worksheet of an XLSX workbook. Cells keep the type the
/// spreadsheet stored them with.
pub fn read_xlsx_records(path: &Path, sheet_name: &str) -> Result<Vec<Record>, IngestError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|error| IngestError::parse(path, error))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|error| IngestError::parse(path, format!("sheet '{sheet_name}': {error}")))?;

    let mut rows = range.rows().filter(|row| !is_blank(row));
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    if let Some(position) = headers.iter().position(String::is_empty) {
        return Err(IngestError::parse(
            path,
            format!("sheet '{sheet_name}': header column {} is empty", position + 1),
        ));
    }

    let records = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = row.get(idx).map_or(FieldValue::Missing, cell_value);
                    (header.clone(), value)
                })
                .collect()
        })
        .collect();
    Ok(records)
}
