//! Client-credentials token fetch.

use crate::error::{AuthError, AuthResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on the token request, in seconds.
pub const TOKEN_FETCH_TIMEOUT_SECS: u64 = 30;

/// Response body of a successful token request.
///
/// `access_token` is optional here so that an endpoint answering 200 with an
/// unrelated JSON document is reported as a missing token rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// Fetch a bearer access token using the OAuth2 client-credentials grant.
///
/// Sends a single `POST` with a form-urlencoded body
/// (`grant_type=client_credentials&client_id=...&client_secret=...`) and
/// expects HTTP 200 with a JSON body carrying `access_token`. No retries are
/// performed; the caller decides retry policy.
///
/// Neither the client secret nor the returned token is ever logged.
pub async fn fetch_access_token(
    client_id: &str,
    client_secret: &str,
    token_url: &str,
) -> AuthResult<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(TOKEN_FETCH_TIMEOUT_SECS))
        .build()?;

    debug!(token_url = %token_url, "requesting access token");

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = client.post(token_url).form(&params).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "token endpoint returned an error");
        return Err(AuthError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

    match token.access_token {
        Some(value) if !value.is_empty() => {
            info!("access token obtained");
            Ok(value)
        }
        _ => Err(AuthError::MissingAccessToken),
    }
}
