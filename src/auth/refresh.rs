// Client-credentials grant

use chrono::{Duration, Utc};
use reqwest::{header, Client};

use super::types::{ClientCredentialsResponse, Credentials, TokenData, TokenErrorResponse};
use crate::error::{CatalogError, Result};

/// Request a new token with the client-credentials grant
pub async fn request_token(
    client: &Client,
    token_url: &str,
    creds: &Credentials,
) -> Result<TokenData> {
    tracing::debug!(url = token_url, "Requesting client-credentials token");

    let form = [("grant_type", "client_credentials")];

    let response = client
        .post(token_url)
        .header(header::AUTHORIZATION, creds.basic_auth_header())
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&form)
        .send()
        .await
        .map_err(|e| CatalogError::Authentication {
            status: None,
            message: format!("token request failed: {}", e),
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        let message = token_error_message(&body);
        tracing::error!(status = status.as_u16(), message = %message, "Token request rejected");
        return Err(CatalogError::Authentication {
            status: Some(status.as_u16()),
            message,
        });
    }

    let data: ClientCredentialsResponse =
        serde_json::from_str(&body).map_err(|e| CatalogError::Authentication {
            status: Some(status.as_u16()),
            message: format!("failed to parse token response: {}", e),
        })?;

    if data.access_token.is_empty() {
        return Err(CatalogError::Authentication {
            status: Some(status.as_u16()),
            message: "token response does not contain access_token".to_string(),
        });
    }

    let expires_at = i64::try_from(data.expires_in)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| CatalogError::Authentication {
            status: Some(status.as_u16()),
            message: format!("invalid expires_in: {}", data.expires_in),
        })?;

    tracing::info!(
        "Access token acquired, expires: {}",
        expires_at.to_rfc3339()
    );

    Ok(TokenData {
        access_token: data.access_token,
        expires_at,
    })
}

/// Best-effort message from a token endpoint error body
fn token_error_message(body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<TokenErrorResponse>(body) {
        if let Some(message) = error.error_description.or(error.error) {
            return message;
        }
    }

    if body.is_empty() {
        "empty response".to_string()
    } else {
        body.to_string()
    }
}
