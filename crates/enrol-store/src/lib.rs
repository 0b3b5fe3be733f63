pub mod database;
pub mod error;
pub mod ids;
pub mod table;

pub use database::Database;
pub use error::StoreError;
pub use ids::{IdSource, MAX_ID_ATTEMPTS, RandomIdSource};
pub use table::Table;
