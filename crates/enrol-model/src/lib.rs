pub mod error;
pub mod fields;
pub mod record;
pub mod schema;

pub use error::{RecordError, RejectKind, SchemaError};
pub use record::{FieldValue, Record, RecordId, StoredRecord};
pub use schema::{FieldType, PropertyDefinition, Schema, SchemaDefinition};
