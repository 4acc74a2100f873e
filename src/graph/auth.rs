//! App-only token acquisition.

use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use crate::config::Config;
use crate::error::{EngineError, EngineResult};

/// Relevant slice of the token endpoint's response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Acquires an app-only Graph access token via the client-credentials grant.
///
/// A failure here is fatal for the whole batch: without a token no mailbox
/// can be read, so the caller aborts instead of producing a report of
/// all-error rows.
///
/// # Errors
///
/// Returns [`EngineError::Auth`] when the endpoint is unreachable, rejects
/// the credentials, or returns anything that is not a JWT-shaped token.
pub async fn fetch_token(client: &Client, config: &Config) -> EngineResult<String> {
    let url = format!(
        "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
        config.tenant_id
    );
    let params = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "client_credentials"),
        ("scope", "https://graph.microsoft.com/.default"),
    ];

    let response = client
        .post(&url)
        .form(&params)
        .send()
        .await
        .map_err(|err| EngineError::Auth {
            message: format!("token request failed: {err}"),
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(%status, "token endpoint rejected the request");
        return Err(EngineError::Auth {
            message: format!("token endpoint returned {status}: {body}"),
        });
    }

    let token: TokenResponse = response.json().await.map_err(|err| EngineError::Auth {
        message: format!("malformed token response: {err}"),
    })?;

    match token.access_token {
        // App tokens are JWTs; a dot-free string cannot be one.
        Some(value) if value.contains('.') => Ok(value),
        _ => Err(EngineError::Auth {
            message: "token response carried no usable access token".to_string(),
        }),
    }
}
