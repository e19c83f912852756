use serde::{Deserialize, Serialize};

use crate::modules::auth::tokens::issue_token;
use crate::modules::auth::verification::{verify_credentials, CredentialOutcome};
use crate::modules::config::AuthConfig;
use crate::modules::store::{RecordStore, StoreError};
use crate::modules::utils::logging::log_auth_event;

/// Credentials submitted once to obtain a session token
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Coarse sign-in verdict returned to the caller
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignInStatus {
    Success,
    Failure,
}

/// Boundary response for the sign-in operation. Every failure cause produces
/// the same body; the token field appears only on success.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SignInResponse {
    pub status: SignInStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SignInResponse {
    pub fn success(token: String) -> Self {
        Self {
            status: SignInStatus::Success,
            token: Some(token),
        }
    }

    pub fn failure() -> Self {
        Self {
            status: SignInStatus::Failure,
            token: None,
        }
    }
}

/// Verify the submitted credentials and, on a match, rotate in a fresh
/// session token.
///
/// Unknown identifiers and wrong passwords return the identical failure body,
/// so callers cannot probe which usernames exist. Only backing-store faults
/// escape as errors; the surrounding gateway turns those into its own failure
/// response.
pub fn sign_in(
    store: &dyn RecordStore,
    config: &AuthConfig,
    request: &SignInRequest,
) -> Result<SignInResponse, StoreError> {
    match verify_credentials(store, config, &request.username, &request.password)? {
        CredentialOutcome::Match => {}
        CredentialOutcome::NoSuchIdentity | CredentialOutcome::Mismatch => {
            log_auth_event("signin", &request.username, false, None);
            return Ok(SignInResponse::failure());
        }
    }

    let token = issue_token(store, config, &request.username)?;
    log_auth_event("signin", &request.username, true, Some("new token issued"));

    Ok(SignInResponse::success(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::verification::hash_password;
    use crate::modules::service::reauth::{reauthenticate, ReauthRequest};
    use crate::modules::store::{MemoryStore, Record};

    // Store double that fails every call, for checking fault propagation
    struct FailingStore;

    impl RecordStore for FailingStore {
        fn get(&self, _table: &str, _key: &str) -> Result<Option<Record>, StoreError> {
            Err(StoreError::Unavailable("record store offline".to_string()))
        }

        fn put(&self, _table: &str, _record: Record) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("record store offline".to_string()))
        }

        fn delete(&self, _table: &str, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("record store offline".to_string()))
        }
    }

    fn store_with_alice(config: &AuthConfig) -> MemoryStore {
        let store = MemoryStore::new()
            .with_table(&config.users_table, &config.users_key_column)
            .with_table(&config.tokens_table, &config.tokens_key_column);

        let mut record = Record::new();
        record.insert(config.users_key_column.clone(), "alice".to_string());
        record.insert(config.users_salt_column.clone(), "xY7".to_string());
        record.insert(
            config.users_password_column.clone(),
            hash_password("xY7", "correcthorse"),
        );
        store.put(&config.users_table, record).unwrap();
        store
    }

    fn signin_request(username: &str, password: &str) -> SignInRequest {
        SignInRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn reauth_request(username: &str, token: &str) -> ReauthRequest {
        ReauthRequest {
            username: Some(username.to_string()),
            token: Some(token.to_string()),
        }
    }

    #[test]
    fn test_sign_in_then_reauthenticate() {
        let config = AuthConfig::default();
        let store = store_with_alice(&config);

        let response = sign_in(&store, &config, &signin_request("alice", "correcthorse")).unwrap();
        assert_eq!(response.status, SignInStatus::Success);

        let token = response.token.unwrap();
        assert_eq!(token.len(), 25);

        // The freshly issued token authorizes
        let reauth = reauthenticate(&store, &config, &reauth_request("alice", &token)).unwrap();
        assert_eq!(
            serde_json::to_string(&reauth).unwrap(),
            r#"{"status":"authorized"}"#
        );

        // A different token for the same user does not
        let reauth = reauthenticate(&store, &config, &reauth_request("alice", "wrong")).unwrap();
        assert_eq!(
            serde_json::to_string(&reauth).unwrap(),
            r#"{"status":"denied"}"#
        );
    }

    #[test]
    fn test_unknown_user_and_wrong_password_look_identical() {
        let config = AuthConfig::default();
        let store = store_with_alice(&config);

        let unknown_user = sign_in(&store, &config, &signin_request("bob", "anything")).unwrap();
        let wrong_password =
            sign_in(&store, &config, &signin_request("alice", "wronghorse")).unwrap();

        assert_eq!(unknown_user, wrong_password);
        assert_eq!(
            serde_json::to_string(&unknown_user).unwrap(),
            serde_json::to_string(&wrong_password).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&unknown_user).unwrap(),
            r#"{"status":"failure"}"#
        );
    }

    #[test]
    fn test_second_sign_in_rotates_token() {
        let config = AuthConfig::default();
        let store = store_with_alice(&config);
        let request = signin_request("alice", "correcthorse");

        let first = sign_in(&store, &config, &request).unwrap().token.unwrap();
        let second = sign_in(&store, &config, &request).unwrap().token.unwrap();
        assert_ne!(first, second);

        // The earlier token no longer validates; the later one does
        let stale = reauthenticate(&store, &config, &reauth_request("alice", &first)).unwrap();
        assert!(!stale.status.is_authorized());

        let live = reauthenticate(&store, &config, &reauth_request("alice", &second)).unwrap();
        assert!(live.status.is_authorized());
    }

    #[test]
    fn test_failed_sign_in_issues_no_token() {
        let config = AuthConfig::default();
        let store = store_with_alice(&config);

        sign_in(&store, &config, &signin_request("alice", "wronghorse")).unwrap();
        assert!(store.get(&config.tokens_table, "alice").unwrap().is_none());
    }

    #[test]
    fn test_store_fault_propagates() {
        let config = AuthConfig::default();

        let result = sign_in(
            &FailingStore,
            &config,
            &signin_request("alice", "correcthorse"),
        );
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let request: SignInRequest =
            serde_json::from_str(r#"{"username":"alice","password":"correcthorse"}"#).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "correcthorse");

        // A request missing either credential is rejected before the core runs
        assert!(serde_json::from_str::<SignInRequest>(r#"{"username":"alice"}"#).is_err());
    }
}
