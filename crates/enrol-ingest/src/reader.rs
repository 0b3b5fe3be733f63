use std::path::Path;

use tracing::{debug, info};

use enrol_model::Record;

use crate::column_types::typed_records;
use crate::csv_table::read_csv_table;
use crate::error::IngestError;
use crate::format::InputFormat;
use crate::xlsx_table::read_xlsx_records;

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Worksheet to read from XLSX workbooks. Ignored for CSV.
    pub sheet_name: String,
}

impl IngestOptions {
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// Loads every row of a registration sheet as a [`Record`].
///
/// The format is picked from the file extension before the file is touched,
/// so an unsupported path fails without any I/O.
pub fn read_records(path: &Path, options: &IngestOptions) -> Result<Vec<Record>, IngestError> {
    let format = InputFormat::from_path(path)?;
    debug!(path = %path.display(), %format, "reading upload");
    let records = match format {
        InputFormat::Csv => typed_records(&read_csv_table(path)?),
        InputFormat::Xlsx => read_xlsx_records(path, &options.sheet_name)?,
    };
    info!(
        path = %path.display(),
        %format,
        record_count = records.len(),
        "upload parsed"
    );
    Ok(records)
}
