use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{Record, RecordStore, StoreError};

type TableMap = HashMap<String, HashMap<String, Record>>;

/// In-memory record store backed by a mutex-guarded table map. Used by tests
/// and by callers embedding the core without external persistence.
pub struct MemoryStore {
    // Table name to key column, fixed at construction
    key_columns: HashMap<String, String>,
    tables: Mutex<TableMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            key_columns: HashMap::new(),
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Register a table and the column holding its unique key
    pub fn with_table(mut self, table: &str, key_column: &str) -> Self {
        self.key_columns
            .insert(table.to_string(), key_column.to_string());
        self
    }

    fn key_column(&self, table: &str) -> Result<&str, StoreError> {
        self.key_columns
            .get(table)
            .map(String::as_str)
            .ok_or_else(|| StoreError::UnknownTable(table.to_string()))
    }

    fn lock_tables(&self) -> Result<MutexGuard<'_, TableMap>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, table: &str, key: &str) -> Result<Option<Record>, StoreError> {
        self.key_column(table)?;
        let tables = self.lock_tables()?;
        Ok(tables.get(table).and_then(|rows| rows.get(key)).cloned())
    }

    fn put(&self, table: &str, record: Record) -> Result<(), StoreError> {
        let key_column = self.key_column(table)?;
        let key = record.get(key_column).cloned().ok_or_else(|| {
            StoreError::InvalidData(format!(
                "record for table {} is missing key column {}",
                table, key_column
            ))
        })?;

        let mut tables = self.lock_tables()?;
        tables
            .entry(table.to_string())
            .or_insert_with(HashMap::new)
            .insert(key, record);
        Ok(())
    }

    fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        self.key_column(table)?;
        let mut tables = self.lock_tables()?;
        if let Some(rows) = tables.get_mut(table) {
            rows.remove(key);
        }
        Ok(())
    }
}
