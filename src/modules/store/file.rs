use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::warn;

use super::{Record, RecordStore, StoreError};

type TableMap = HashMap<String, HashMap<String, Record>>;

/// Record store persisted as a single JSON file. Every mutation rewrites the
/// file, so the on-disk copy always matches the in-memory map.
pub struct FileStore {
    path: PathBuf,
    // Table name to key column, fixed at construction
    key_columns: HashMap<String, String>,
    tables: Mutex<TableMap>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing data. A missing or
    /// unparseable file opens as an empty store.
    pub fn open(path: &Path) -> Self {
        let tables = match File::open(path) {
            Ok(mut file) => {
                let mut data = String::new();
                match file.read_to_string(&mut data) {
                    Ok(_) => match serde_json::from_str(&data) {
                        Ok(parsed) => parsed,
                        Err(e) => {
                            warn!(
                                "Record file {} could not be parsed: {}. Starting empty.",
                                path.display(),
                                e
                            );
                            HashMap::new()
                        }
                    },
                    Err(e) => {
                        warn!(
                            "Record file {} could not be read: {}. Starting empty.",
                            path.display(),
                            e
                        );
                        HashMap::new()
                    }
                }
            }
            Err(_) => HashMap::new(), // New store if file doesn't exist
        };

        Self {
            path: path.to_path_buf(),
            key_columns: HashMap::new(),
            tables: Mutex::new(tables),
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

    fn persist(&self, tables: &TableMap) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(tables)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        File::create(&self.path)?.write_all(data.as_bytes())?;
        Ok(())
    }
}

impl RecordStore for FileStore {
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
        self.persist(&tables)
    }

    fn delete(&self, table: &str, key: &str) -> Result<(), StoreError> {
        self.key_column(table)?;
        let mut tables = self.lock_tables()?;
        if let Some(rows) = tables.get_mut(table) {
            rows.remove(key);
        }
        self.persist(&tables)
    }
}
