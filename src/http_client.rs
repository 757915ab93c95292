use reqwest::{header, Client};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::CredentialManager;
use crate::error::{CatalogError, Result};

/// Build the HTTP client shared by token and resource requests
pub fn build_client(connect_timeout: u64, request_timeout: u64) -> Result<Client> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout))
        .timeout(Duration::from_secs(request_timeout))
        .build()?;
    Ok(client)
}

/// HTTP client for catalog resource endpoints
pub struct CatalogHttpClient {
    /// Shared HTTP client with connection pooling
    client: Client,

    /// Token source for the bearer header
    auth_manager: Arc<CredentialManager>,

    /// `{api_url}/{api_version}`, no trailing slash
    api_root: String,
}

impl CatalogHttpClient {
    pub fn new(
        client: Client,
        auth_manager: Arc<CredentialManager>,
        api_url: &str,
        api_version: &str,
    ) -> Self {
        let api_root = format!(
            "{}/{}",
            api_url.trim_end_matches('/'),
            api_version.trim_matches('/')
        );

        Self {
            client,
            auth_manager,
            api_root,
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Full URL of an endpoint path such as `tracks/{id}`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_root, endpoint.trim_start_matches('/'))
    }

    /// GET an endpoint and return its JSON body unmodified
    /// Non-2xx responses become `UpstreamRequest` errors; there are no retries.
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let token = self.auth_manager.get_token().await?;
        let url = self.endpoint_url(endpoint);

        tracing::debug!(url = %url, params = ?params, "Sending HTTP request");

        let result = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .query(params)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    error_kind = error_kind(&e),
                    error = %e,
                    url = %url,
                    "HTTP request error"
                );
                return Err(CatalogError::Http(e));
            }
        };

        let status = response.status();
        tracing::debug!(status = %status, "Received HTTP response");

        let body = response.text().await.map_err(|e| {
            tracing::warn!(error_kind = error_kind(&e), error = %e, url = %url, "Failed to read response body");
            CatalogError::Http(e)
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                endpoint = endpoint,
                message = ?message,
                "Received error response"
            );
            return Err(CatalogError::UpstreamRequest {
                status_code: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Categorize a transport error for logging
fn error_kind(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connection_failed"
    } else if e.is_request() {
        "request_error"
    } else if e.is_body() {
        "body_error"
    } else if e.is_decode() {
        "decode_error"
    } else {
        "unknown"
    }
}

/// Error message of a failed resource request:
/// `error.message` of a JSON body, the raw text otherwise, none for an empty body
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}
