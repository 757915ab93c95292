// Error handling module
// Defines the error taxonomy shared by auth, fetching and hydration

use thiserror::Error;

/// Errors that can occur while talking to the catalog API
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Client id / secret rejected before any network call
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Token endpoint rejected the credentials or returned an unusable token
    #[error("Authentication failed{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Authentication { status: Option<u16>, message: String },

    /// Non-2xx response from a resource endpoint
    #[error(
        "Upstream request failed: {status_code} {endpoint} - {}",
        .message.as_deref().unwrap_or("no message")
    )]
    UpstreamRequest {
        status_code: u16,
        endpoint: String,
        message: Option<String>,
    },

    /// Hydrator invoked with an item kind missing from the schema table
    #[error("Unknown item kind: {0}")]
    UnknownItemKind(String),

    /// Primary entity does not match the fields of its kind
    #[error("Cannot hydrate {kind}: {message}")]
    Hydration { kind: String, message: String },

    /// A 2xx body lacks the envelope key the endpoint is documented to return
    #[error("Unexpected response from {endpoint}: missing '{key}'")]
    UnexpectedResponse { endpoint: String, key: String },

    /// Caller-side argument validation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport failure on a resource request
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether the error comes from credentials or from a rejected bearer token
    pub fn is_auth_error(&self) -> bool {
        match self {
            CatalogError::InvalidCredentials(_) | CatalogError::Authentication { .. } => true,
            CatalogError::UpstreamRequest { status_code, .. } => *status_code == 401,
            _ => false,
        }
    }

    /// Upstream HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CatalogError::Authentication { status, .. } => *status,
            CatalogError::UpstreamRequest { status_code, .. } => Some(*status_code),
            CatalogError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
