// Authentication types

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{CatalogError, Result};

/// Client id / secret pair of one client instance.
/// Only obtainable through `Credentials::new`, so every instance is validated.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Validate and build a credential pair.
    ///
    /// Both values must be non-blank and the id must not contain ':', which
    /// would make the Basic credential ambiguous.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(CatalogError::InvalidCredentials(
                "client_id must not be empty".to_string(),
            ));
        }
        if client_secret.trim().is_empty() {
            return Err(CatalogError::InvalidCredentials(
                "client_secret must not be empty".to_string(),
            ));
        }
        if client_id.contains(':') {
            return Err(CatalogError::InvalidCredentials(
                "client_id must not contain ':'".to_string(),
            ));
        }

        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// base64("client_id:client_secret")
    pub fn basic_credentials(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret))
    }

    /// Value of the Authorization header for the token request
    pub fn basic_auth_header(&self) -> String {
        format!("Basic {}", self.basic_credentials())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Cached token state of a credential manager
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl TokenState {
    /// Token usable at `now`: present and strictly before its expiry
    pub fn usable_token(&self, now: DateTime<Utc>) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(expires_at)) if now < expires_at => Some(token.as_str()),
            _ => None,
        }
    }
}

/// Token data from a successful grant
#[derive(Debug, Clone)]
pub struct TokenData {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token endpoint response of the client-credentials grant
#[derive(Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// OAuth2 error body of the token endpoint
#[derive(Deserialize)]
pub struct TokenErrorResponse {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_basic_credentials() {
        let creds = Credentials::new("id", "secret").unwrap();
        assert_eq!(creds.basic_credentials(), "aWQ6c2VjcmV0");
        assert_eq!(creds.basic_auth_header(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn test_invalid_credentials() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(CatalogError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("id", "   "),
            Err(CatalogError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("id:x", "secret"),
            Err(CatalogError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_validated_values_are_kept() {
        let creds = Credentials::new("my-client", "my-secret").unwrap();
        assert_eq!(creds.client_id(), "my-client");
        assert_eq!(creds.basic_credentials(), STANDARD.encode("my-client:my-secret"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("id", "super-secret").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("id"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_usable_token() {
        let now = Utc::now();

        let state = TokenState::default();
        assert_eq!(state.usable_token(now), None);

        let state = TokenState {
            access_token: Some("abc".to_string()),
            expires_at: Some(now + Duration::seconds(60)),
        };
        assert_eq!(state.usable_token(now), Some("abc"));

        // Expiry is exclusive
        let state = TokenState {
            access_token: Some("abc".to_string()),
            expires_at: Some(now),
        };
        assert_eq!(state.usable_token(now), None);

        let state = TokenState {
            access_token: None,
            expires_at: Some(now + Duration::seconds(60)),
        };
        assert_eq!(state.usable_token(now), None);
    }
}
