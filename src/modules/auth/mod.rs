pub mod tokens;
pub mod validation;
pub mod verification;

// Re-export the main types and functions
pub use tokens::{generate_salt, generate_token, issue_token};
pub use validation::{validate_token, TokenOutcome};
pub use verification::{hash_password, verify_credentials, CredentialOutcome};
