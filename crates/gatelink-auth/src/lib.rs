//! OAuth2 client-credentials authentication for gatelink.
//!
//! Tool gateways sit behind an OAuth2 token endpoint. This crate performs
//! the client-credentials grant and hands back the bearer access token used
//! to authorize gateway requests.
//!
//! Tokens are plain strings with no expiry tracking: the caller treats a
//! token as valid until a gateway operation fails with an authentication
//! error, then fetches a fresh one. Nothing is persisted.
//!
//! # Example
//!
//! ```no_run
//! use gatelink_auth::fetch_access_token;
//!
//! # async fn example() -> gatelink_auth::AuthResult<()> {
//! let token = fetch_access_token(
//!     "my-client-id",
//!     "my-client-secret",
//!     "https://auth.example.com/oauth2/token",
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod token;

pub use error::{AuthError, AuthResult};
pub use token::{fetch_access_token, TokenResponse, TOKEN_FETCH_TIMEOUT_SECS};
