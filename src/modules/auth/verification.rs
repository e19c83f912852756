use log::{info, warn};
use sha2::{Digest, Sha256};

use crate::modules::config::AuthConfig;
use crate::modules::store::{RecordStore, StoreError};
use crate::modules::utils::logging::format_sensitive;

/// Outcome of checking a submitted password against the stored identity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    /// Salted digest of the attempt matches the stored hash
    Match,
    /// No identity record exists for the identifier
    NoSuchIdentity,
    /// Identity exists but the digest differs
    Mismatch,
}

impl CredentialOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, CredentialOutcome::Match)
    }
}

/// Compute the lowercase hex SHA-256 digest of the salt concatenated with the
/// password
pub fn hash_password(salt: &str, password: &str) -> String {
    let salted = format!("{}{}", salt, password);
    hex::encode(Sha256::digest(salted.as_bytes()))
}

/// Look up the identity record for `username` and compare the salted digest
/// of `password_attempt` against the stored hash, by exact string equality.
///
/// Read-only. Callers at the boundary must surface `NoSuchIdentity` and
/// `Mismatch` identically so that unknown usernames stay indistinguishable
/// from wrong passwords; the two are told apart only in the log stream.
pub fn verify_credentials(
    store: &dyn RecordStore,
    config: &AuthConfig,
    username: &str,
    password_attempt: &str,
) -> Result<CredentialOutcome, StoreError> {
    if config.detailed_logging {
        info!("User: {} attempting to sign in.", format_sensitive(username));
    }

    let record = match store.get(&config.users_table, username)? {
        Some(record) => record,
        None => {
            warn!("User: {} not found in user store.", format_sensitive(username));
            return Ok(CredentialOutcome::NoSuchIdentity);
        }
    };

    // A record without its salt or password column is a malformed store row,
    // not a failed attempt
    let salt = record.get(&config.users_salt_column).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "user record missing column {}",
            config.users_salt_column
        ))
    })?;
    let stored_hash = record.get(&config.users_password_column).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "user record missing column {}",
            config.users_password_column
        ))
    })?;

    if hash_password(salt, password_attempt) == *stored_hash {
        Ok(CredentialOutcome::Match)
    } else {
        if config.detailed_logging {
            warn!("User: {} failed sign in.", format_sensitive(username));
        }
        Ok(CredentialOutcome::Mismatch)
    }
}
