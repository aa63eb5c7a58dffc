//! Gateway error types.

use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while talking to a tool gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required environment variable is absent or empty.
    #[error("missing environment variable: {name}")]
    MissingEnv { name: String },

    /// Configuration value present but invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Access token fetch failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] gatelink_auth::AuthError),

    /// Gateway rejected the bearer token.
    #[error("gateway rejected credentials (HTTP 401)")]
    Unauthorized,

    /// Connection to the gateway failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Gateway request timed out.
    #[error("gateway request timed out")]
    Timeout,

    /// Response violated the wire protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Session initialization handshake failed.
    #[error("session initialization failed: {0}")]
    Init(String),

    /// Gateway answered a request with a JSON-RPC error.
    #[error("gateway error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Tool discovery failed (transport failure or pagination violation).
    #[error("tool discovery failed: {0}")]
    Discovery(String),

    /// A tool call is missing a required argument; checked before any I/O.
    #[error("invalid arguments for tool '{tool}': {message}")]
    Validation { tool: String, message: String },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GatewayError {
    /// Create a connection failed error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Create an initialization error.
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init(message.into())
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }
}
