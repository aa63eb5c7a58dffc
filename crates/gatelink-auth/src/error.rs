//! Authentication error types.

use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while fetching an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token endpoint returned a non-success status.
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Token endpoint returned a body that is not valid JSON.
    #[error("malformed token response: {0}")]
    InvalidResponse(String),

    /// Token endpoint responded without an `access_token` field.
    #[error("token response did not contain an access token")]
    MissingAccessToken,

    /// The HTTP request itself failed (connection, timeout, TLS).
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
}
