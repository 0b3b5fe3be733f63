use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a table named {table} already exists in {database}")]
    TableExists { database: String, table: String },

    #[error("no table named {table} in {database}")]
    TableNotFound { database: String, table: String },

    #[error("the attr {field} does not exist, the available properties are: {available}")]
    FieldNotFound { field: String, available: String },

    #[error("could not generate an unused record id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}
