// Authentication module
// Client-credentials token acquisition and caching

mod manager;
mod refresh;
mod types;

pub use manager::CredentialManager;
pub use types::{Credentials, TokenData};
