//! Connected gateway client.

use crate::capability::Capability;
use crate::catalog;
use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::http::GatewayEndpoint;
use gatelink_auth::fetch_access_token;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// A gateway with a fetched token and a discovered catalog.
///
/// `connect` is the whole lifecycle: fetch the access token, sweep the tool
/// catalog, wrap one [`Capability`] per descriptor. Both the token and the
/// capability list are read-only afterwards - if the token expires, calls
/// start failing with authentication errors and the host connects again.
pub struct GatewayClient {
    config: GatewayConfig,
    capabilities: Vec<Capability>,
}

/// Redacted connection summary.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayInfo {
    pub gateway_url: String,
    pub tool_count: usize,
    pub tools: Vec<ToolSummary>,
}

/// Name and description of one discovered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
}

impl GatewayClient {
    /// Fetch a token, discover the catalog, and wrap every tool.
    ///
    /// A token failure aborts before any gateway traffic; a discovery
    /// failure aborts without returning a partial catalog.
    pub async fn connect(config: GatewayConfig) -> GatewayResult<Self> {
        info!(token_url = %config.token_url, "fetching gateway access token");
        let token =
            fetch_access_token(&config.client_id, &config.client_secret, &config.token_url)
                .await?;

        let endpoint = GatewayEndpoint::new(config.gateway_url.clone(), token)
            .with_timeout(Duration::from_secs(config.timeout_secs));

        let descriptors = catalog::discover(&endpoint).await?;
        info!(
            gateway = %config.gateway_url,
            count = descriptors.len(),
            "discovered gateway tools"
        );

        let capabilities = descriptors
            .into_iter()
            .map(|descriptor| Capability::new(descriptor, endpoint.clone()))
            .collect();

        Ok(Self {
            config,
            capabilities,
        })
    }

    /// Every discovered capability, in gateway order.
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Look a capability up by name. Duplicate names are passed through from
    /// the gateway; the first occurrence wins here.
    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|c| c.name() == name)
    }

    /// Names of every discovered tool, in gateway order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.capabilities.iter().map(Capability::name).collect()
    }

    /// Whether the gateway reported any tools at all.
    pub fn has_tools(&self) -> bool {
        !self.capabilities.is_empty()
    }

    /// Redacted summary of the connection.
    pub fn describe(&self) -> GatewayInfo {
        GatewayInfo {
            gateway_url: self.config.gateway_url.clone(),
            tool_count: self.capabilities.len(),
            tools: self
                .capabilities
                .iter()
                .map(|c| ToolSummary {
                    name: c.name().to_string(),
                    description: c.description(),
                })
                .collect(),
        }
    }
}
