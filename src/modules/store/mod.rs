use std::collections::HashMap;
use std::fmt;
use std::io;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A single stored row: string-typed field names mapped to string values
pub type Record = HashMap<String, String>;

/// Custom error type for record store operations
#[derive(Debug)]
pub enum StoreError {
    UnknownTable(String),
    InvalidData(String),
    Unavailable(String),
    IoError(io::Error),
}

// Implement conversion from io::Error to StoreError
impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::IoError(error)
    }
}

// Implementation of Display trait for StoreError
impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownTable(name) => write!(f, "Unknown table: {}", name),
            StoreError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Key-value contract the authentication core runs against. Each table holds
/// at most one record per key; `put` overwrites, and `delete` of an absent
/// key is a no-op. No range queries, transactions, or secondary indexes.
pub trait RecordStore {
    /// Exact-match lookup of a single record by the table's key column
    fn get(&self, table: &str, key: &str) -> Result<Option<Record>, StoreError>;

    /// Insert or overwrite a record. The record must carry the table's key column.
    fn put(&self, table: &str, record: Record) -> Result<(), StoreError>;

    /// Remove the record stored under `key`, if any
    fn delete(&self, table: &str, key: &str) -> Result<(), StoreError>;
}
