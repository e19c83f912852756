use log::{info, warn};

use crate::modules::config::AuthConfig;
use crate::modules::store::{RecordStore, StoreError};
use crate::modules::utils::logging::format_sensitive;

/// Outcome of checking a presented token against the stored token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    Authorized,
    Denied,
}

impl TokenOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, TokenOutcome::Authorized)
    }
}

/// Compare a presented token against the one stored for `username`, by exact
/// string equality. A request missing either field is denied before any store
/// lookup happens.
///
/// Read-only: successful validation does not rotate or touch the stored
/// token, so the same token keeps validating until a new sign-in replaces it.
pub fn validate_token(
    store: &dyn RecordStore,
    config: &AuthConfig,
    username: Option<&str>,
    token_attempt: Option<&str>,
) -> Result<TokenOutcome, StoreError> {
    let (username, token_attempt) = match (username, token_attempt) {
        (Some(username), Some(token_attempt)) => (username, token_attempt),
        _ => {
            warn!("No token or username provided.");
            return Ok(TokenOutcome::Denied);
        }
    };

    if config.detailed_logging {
        info!(
            "User: {} attempting to auth with token.",
            format_sensitive(username)
        );
    }

    let record = match store.get(&config.tokens_table, username)? {
        Some(record) => record,
        None => {
            warn!(
                "User: {} not found in token store.",
                format_sensitive(username)
            );
            return Ok(TokenOutcome::Denied);
        }
    };

    let stored_token = record.get(&config.tokens_token_column).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "token record missing column {}",
            config.tokens_token_column
        ))
    })?;

    if token_attempt == stored_token {
        Ok(TokenOutcome::Authorized)
    } else {
        warn!(
            "User: {} failed to token authorise.",
            format_sensitive(username)
        );
        Ok(TokenOutcome::Denied)
    }
}
