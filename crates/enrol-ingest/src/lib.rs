pub mod column_types;
pub mod csv_table;
pub mod error;
pub mod format;
pub mod reader;
pub mod xlsx_table;

pub use column_types::{ColumnType, infer_column_type, parse_f64, parse_i64, typed_records};
pub use csv_table::{RawTable, read_csv_table};
pub use error::IngestError;
pub use format::InputFormat;
pub use reader::{DEFAULT_SHEET_NAME, IngestOptions, read_records};
pub use xlsx_table::read_xlsx_records;
