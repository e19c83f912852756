pub mod reauth;
pub mod signin;

// Re-export the operation entry points and their wire types
pub use reauth::{reauthenticate, ReauthRequest, ReauthResponse, ReauthStatus};
pub use signin::{sign_in, SignInRequest, SignInResponse, SignInStatus};
