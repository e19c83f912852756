// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    auth,
    config,
    service,
    store,
    utils,
};

// Re-export commonly used types
pub use modules::auth::verification::CredentialOutcome;
pub use modules::auth::validation::TokenOutcome;
pub use modules::config::AuthConfig;
pub use modules::service::signin::{SignInRequest, SignInResponse};
pub use modules::service::reauth::{ReauthRequest, ReauthResponse};
pub use modules::store::{FileStore, MemoryStore, Record, RecordStore, StoreError};

// Constants
pub const DEFAULT_TOKEN_LENGTH: usize = 25;
pub const DEFAULT_SALT_LENGTH: usize = 5;
pub const CONFIG_FILE: &str = "gatewarden.json";
pub const STORE_FILE: &str = "records.json";
