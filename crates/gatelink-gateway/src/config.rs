//! Connector configuration.
//!
//! All connection parameters come from the environment. A missing variable
//! is a configuration error naming the variable, raised before any network
//! call is attempted.

use crate::error::{GatewayError, GatewayResult};
use serde::Serialize;

/// Gateway endpoint URL.
pub const ENV_GATEWAY_URL: &str = "GATELINK_GATEWAY_URL";
/// OAuth2 client id.
pub const ENV_CLIENT_ID: &str = "GATELINK_CLIENT_ID";
/// OAuth2 client secret.
pub const ENV_CLIENT_SECRET: &str = "GATELINK_CLIENT_SECRET";
/// OAuth2 token endpoint URL.
pub const ENV_TOKEN_URL: &str = "GATELINK_TOKEN_URL";
/// Optional per-request timeout override, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "GATELINK_TIMEOUT_SECS";

/// Default per-request timeout for gateway operations, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection parameters for one gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway endpoint URL.
    pub gateway_url: String,
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// OAuth2 token endpoint URL.
    pub token_url: String,
    /// Per-request timeout for gateway operations, in seconds.
    pub timeout_secs: u64,
}

/// Loggable view of the configuration. The secret never appears.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub gateway_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Build a configuration, validating both URLs.
    pub fn new(
        gateway_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> GatewayResult<Self> {
        let gateway_url = gateway_url.into();
        let token_url = token_url.into();

        validate_url(ENV_GATEWAY_URL, &gateway_url)?;
        validate_url(ENV_TOKEN_URL, &token_url)?;

        Ok(Self {
            gateway_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load the configuration from `GATELINK_*` environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        let gateway_url = require_env(ENV_GATEWAY_URL)?;
        let client_id = require_env(ENV_CLIENT_ID)?;
        let client_secret = require_env(ENV_CLIENT_SECRET)?;
        let token_url = require_env(ENV_TOKEN_URL)?;

        let mut config = Self::new(gateway_url, client_id, client_secret, token_url)?;

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                GatewayError::Config(format!("invalid {ENV_TIMEOUT_SECS}: '{raw}'"))
            })?;
        }

        Ok(config)
    }

    /// Redacted summary for display and logging.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            gateway_url: self.gateway_url.clone(),
            token_url: self.token_url.clone(),
            client_id: self.client_id.clone(),
            client_secret: "<redacted>".to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn require_env(name: &str) -> GatewayResult<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| GatewayError::MissingEnv {
            name: name.to_string(),
        })
}

fn validate_url(name: &str, value: &str) -> GatewayResult<()> {
    url::Url::parse(value)
        .map_err(|e| GatewayError::Config(format!("invalid {name} '{value}': {e}")))?;
    Ok(())
}
