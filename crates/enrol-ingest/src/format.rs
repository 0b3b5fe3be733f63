use std::fmt;
use std::path::Path;

use crate::error::IngestError;

/// Tabular formats an upload may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xlsx,
}

impl InputFormat {
    pub const ALL: [InputFormat; 2] = [InputFormat::Csv, InputFormat::Xlsx];

    /// File extension that selects this format. Matching is case-sensitive.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Xlsx => "xlsx",
        }
    }

    /// Human name used when listing supported formats.
    pub fn label(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Xlsx => "excel",
        }
    }

    /// Detects the format from the path's extension. The file is not opened.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let extension = path.extension().and_then(|ext| ext.to_str());
        Self::ALL
            .into_iter()
            .find(|format| Some(format.extension()) == extension)
            .ok_or_else(|| IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                supported: supported_formats(),
            })
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn supported_formats() -> String {
    InputFormat::ALL
        .iter()
        .map(InputFormat::label)
        .collect::<Vec<_>>()
        .join(", ")
}
