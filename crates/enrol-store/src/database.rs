use std::collections::BTreeMap;

use tracing::info;

use enrol_model::Schema;

use crate::error::StoreError;
use crate::table::Table;

/// Volatile set of uniquely named tables.
#[derive(Debug)]
pub struct Database {
    name: String,
    tables: BTreeMap<String, Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        info!(database = %name, "database created");
        Self {
            name,
            tables: BTreeMap::new(),
        }
    }

    /// A database holding exactly `table`.
    pub fn with_table(name: impl Into<String>, table: Table) -> Self {
        let mut database = Self::new(name);
        info!(database = %database.name, table = %table.name(), "table created");
        database.tables.insert(table.name().to_string(), table);
        database
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a new table. An existing table with the same name is left
    /// untouched and the conflict is returned.
    pub fn create_table(&mut self, name: impl Into<String>, schema: Schema) -> Result<(), StoreError> {
        self.add_table(Table::new(name, schema))
    }

    /// Registers a pre-built table, e.g. one with its own id source.
    pub fn add_table(&mut self, table: Table) -> Result<(), StoreError> {
        if self.tables.contains_key(table.name()) {
            return Err(StoreError::TableExists {
                database: self.name.clone(),
                table: table.name().to_string(),
            });
        }
        info!(database = %self.name, table = %table.name(), "table created");
        self.tables.insert(table.name().to_string(), table);
        Ok(())
    }

    pub fn delete_table(&mut self, name: &str) -> Result<Table, StoreError> {
        let table = self
            .tables
            .remove(name)
            .ok_or_else(|| self.not_found(name))?;
        info!(database = %self.name, table = %name, "table deleted");
        Ok(table)
    }

    pub fn table(&self, name: &str) -> Result<&Table, StoreError> {
        self.tables.get(name).ok_or_else(|| self.not_found(name))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, StoreError> {
        let Self { name: db_name, tables } = self;
        tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound {
                database: db_name.clone(),
                table: name.to_string(),
            })
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    fn not_found(&self, table: &str) -> StoreError {
        StoreError::TableNotFound {
            database: self.name.clone(),
            table: table.to_string(),
        }
    }
}
