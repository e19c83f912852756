use log::info;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::modules::config::AuthConfig;
use crate::modules::store::{Record, RecordStore, StoreError};

/// Generate an opaque session token: `length` characters drawn uniformly and
/// independently from uppercase letters, lowercase letters, and digits
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generate a salt for a new identity record. Identity records are created
/// and maintained outside the sign-in path; the generator lives here so
/// operator tooling and tests share one sampler.
pub fn generate_salt(length: usize) -> String {
    generate_token(length)
}

/// Retire any existing token for `username` and persist a freshly generated
/// one. Callers run this only after the credential check has passed; nothing
/// here re-verifies the identity. The new token is returned by value; that
/// return is the only channel it travels through.
///
/// The get/delete/put sequence is three separate store calls with no
/// transaction around them. Two concurrent issuances for the same identifier
/// can interleave so that the store's last write wins and the other caller
/// holds a token that no longer validates.
pub fn issue_token(
    store: &dyn RecordStore,
    config: &AuthConfig,
    username: &str,
) -> Result<String, StoreError> {
    info!("Generating token.");

    // Check if the user has an existing token, and delete it so the new one
    // becomes the only live credential. Rotation is unconditional; there is
    // no expiry check.
    if store.get(&config.tokens_table, username)?.is_some() {
        if config.detailed_logging {
            info!("Pre-existing token found. Deleting old token.");
        }
        store.delete(&config.tokens_table, username)?;
    }

    // Create new token. Uniqueness against the store is not checked; at the
    // default length the collision chance is negligible.
    let token = generate_token(config.token_length);

    // Write the token record keyed by the user identifier
    let mut record = Record::new();
    record.insert(config.tokens_key_column.clone(), username.to_string());
    record.insert(config.tokens_token_column.clone(), token.clone());
    store.put(&config.tokens_table, record)?;

    if config.detailed_logging {
        info!(
            "Token generated successfully, and written to {} table.",
            config.tokens_table
        );
    }

    Ok(token)
}
