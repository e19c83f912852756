use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::DEFAULT_TOKEN_LENGTH;

/// Process-wide authentication settings: which tables and columns the record
/// store serves, how long generated tokens are, and how chatty the logs get.
/// Read once at startup and treated as immutable afterwards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthConfig {
    /// Table holding identity records
    pub users_table: String,
    /// Column holding user identifiers (username, UID, email)
    pub users_key_column: String,
    /// Column holding per-user salts
    pub users_salt_column: String,
    /// Column holding salted SHA-256 password digests
    pub users_password_column: String,
    /// Table holding issued session tokens
    pub tokens_table: String,
    /// Column holding token owner identifiers
    pub tokens_key_column: String,
    /// Column holding the token values themselves
    pub tokens_token_column: String,
    /// Length of generated tokens
    pub token_length: usize,
    /// Log intermediate success/failure steps in addition to terminal outcomes
    pub detailed_logging: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_table: "users".to_string(),
            users_key_column: "username".to_string(),
            users_salt_column: "salt".to_string(),
            users_password_column: "password".to_string(),
            tokens_table: "tokens".to_string(),
            tokens_key_column: "username".to_string(),
            tokens_token_column: "token".to_string(),
            token_length: DEFAULT_TOKEN_LENGTH,
            detailed_logging: true,
        }
    }
}

impl AuthConfig {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file is missing or cannot be parsed
    pub fn load(path: &Path) -> Self {
        match File::open(path) {
            Ok(mut file) => {
                let mut data = String::new();
                match file.read_to_string(&mut data) {
                    Ok(_) => serde_json::from_str(&data).unwrap_or_else(|_| Self::default()),
                    Err(_) => Self::default(),
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        File::create(path)?.write_all(data.as_bytes())
    }
}
