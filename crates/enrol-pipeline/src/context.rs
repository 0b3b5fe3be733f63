//! Pipeline context for bulk registration.
//!
//! The [`PipelineContext`] bundles what an upload needs: the database and
//! the name of the table uploads go into, the acceptance rules, and the
//! ingestion options. The caller builds it once and passes it to every
//! upload.

use enrol_ingest::IngestOptions;
use enrol_model::Schema;
use enrol_store::{Database, StoreError, Table};
use enrol_validate::RuleConfig;

pub const DEFAULT_DATABASE_NAME: &str = "registry";
pub const DEFAULT_TABLE_NAME: &str = "children";

#[derive(Debug)]
pub struct PipelineContext {
    pub database: Database,
    /// Table that accepted registrations are committed to.
    pub table_name: String,
    pub rules: RuleConfig,
    pub ingest: IngestOptions,
}

impl PipelineContext {
    /// Creates a database holding a single empty table for `schema`.
    pub fn new(
        database_name: impl Into<String>,
        table_name: impl Into<String>,
        schema: Schema,
    ) -> Result<Self, StoreError> {
        let table_name = table_name.into();
        let mut database = Database::new(database_name);
        database.create_table(table_name.clone(), schema)?;
        Ok(Self::from_database(database, table_name))
    }

    /// Wraps an existing database. The table is looked up on each upload.
    pub fn from_database(database: Database, table_name: impl Into<String>) -> Self {
        Self {
            database,
            table_name: table_name.into(),
            rules: RuleConfig::default(),
            ingest: IngestOptions::default(),
        }
    }

    /// The default registry: one `children` table with the registration schema.
    pub fn registration() -> Self {
        let table = Table::new(DEFAULT_TABLE_NAME, Schema::registration());
        Self::from_database(
            Database::with_table(DEFAULT_DATABASE_NAME, table),
            DEFAULT_TABLE_NAME,
        )
    }

    pub fn with_rules(mut self, rules: RuleConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_ingest_options(mut self, ingest: IngestOptions) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn table(&self) -> Result<&Table, StoreError> {
        self.database.table(&self.table_name)
    }
}
