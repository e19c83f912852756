use serde::{Deserialize, Serialize};

use crate::modules::auth::validation::{validate_token, TokenOutcome};
use crate::modules::config::AuthConfig;
use crate::modules::store::{RecordStore, StoreError};
use crate::modules::utils::logging::log_auth_event;

/// Identifier/token pair presented in place of credentials. Both fields are
/// optional at the wire level; the core denies any request missing either.
#[derive(Debug, Deserialize)]
pub struct ReauthRequest {
    pub username: Option<String>,
    pub token: Option<String>,
}

/// Coarse authorization verdict returned to the caller
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReauthStatus {
    Authorized,
    Denied,
}

impl ReauthStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(self, ReauthStatus::Authorized)
    }
}

/// Boundary response for token validation. Missing fields, unknown users and
/// wrong tokens all yield the same body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReauthResponse {
    pub status: ReauthStatus,
}

impl ReauthResponse {
    pub fn authorized() -> Self {
        Self {
            status: ReauthStatus::Authorized,
        }
    }

    pub fn denied() -> Self {
        Self {
            status: ReauthStatus::Denied,
        }
    }
}

/// Validate a previously issued token for the claimed identifier. Read-only;
/// a token keeps authorizing until a later sign-in rotates it.
pub fn reauthenticate(
    store: &dyn RecordStore,
    config: &AuthConfig,
    request: &ReauthRequest,
) -> Result<ReauthResponse, StoreError> {
    let username = request.username.as_deref();
    let outcome = validate_token(store, config, username, request.token.as_deref())?;

    match outcome {
        TokenOutcome::Authorized => {
            log_auth_event("reauth", username.unwrap_or(""), true, None);
            Ok(ReauthResponse::authorized())
        }
        TokenOutcome::Denied => {
            log_auth_event("reauth", username.unwrap_or(""), false, None);
            Ok(ReauthResponse::denied())
        }
    }
}
