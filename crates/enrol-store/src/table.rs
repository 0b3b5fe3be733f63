use std::collections::HashSet;
use std::fmt;

use tracing::{debug, trace};

use enrol_model::{FieldValue, Record, RecordId, Schema, StoredRecord};

use crate::error::StoreError;
use crate::ids::{IdSource, MAX_ID_ATTEMPTS, RandomIdSource};

/// Named, append-only collection of committed records sharing one schema.
///
/// The table does not validate what it stores; callers check records
/// against [`Table::schema`] before inserting.
pub struct Table {
    name: String,
    schema: Schema,
    records: Vec<StoredRecord>,
    issued: HashSet<RecordId>,
    ids: Box<dyn IdSource>,
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self::with_id_source(name, schema, RandomIdSource)
    }

    pub fn with_id_source(
        name: impl Into<String>,
        schema: Schema,
        ids: impl IdSource + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            schema,
            records: Vec::new(),
            issued: HashSet::new(),
            ids: Box::new(ids),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Commits `record` under a freshly generated id.
    ///
    /// Candidate ids that were already issued are discarded and redrawn.
    pub fn insert(&mut self, record: Record) -> Result<&StoredRecord, StoreError> {
        let id = self.fresh_id()?;
        self.issued.insert(id.clone());
        debug!(table = %self.name, id = %id, "record inserted");
        self.records.push(StoredRecord::new(id, record));
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    fn fresh_id(&mut self) -> Result<RecordId, StoreError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !self.issued.contains(&candidate) {
                return Ok(candidate);
            }
            trace!(table = %self.name, attempt, "record id collision, redrawing");
        }
        Err(StoreError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Every record whose `field` equals `value`, in insertion order.
    ///
    /// `field` must be a declared schema property. An empty table yields an
    /// empty result rather than an error.
    pub fn lookup(&self, field: &str, value: &FieldValue) -> Result<Vec<&StoredRecord>, StoreError> {
        if !self.schema.has_property(field) {
            return Err(StoreError::FieldNotFound {
                field: field.to_string(),
                available: self.schema.property_names().join(", "),
            });
        }
        Ok(self
            .records
            .iter()
            .filter(|stored| stored.get(field).is_some_and(|stored| stored.matches(value)))
            .collect())
    }

    pub fn get(&self, id: &RecordId) -> Option<&StoredRecord> {
        self.records.iter().find(|stored| stored.id() == id)
    }

    /// All committed records in insertion order.
    pub fn list_all(&self) -> &[StoredRecord] {
        &self.records
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
