//! Client-side connector for remote tool gateways.
//!
//! A tool gateway exposes a set of remotely-defined tools over a JSON-RPC
//! protocol (initialize a session, list tools, call a tool) behind OAuth2
//! client-credentials authentication. This crate discovers those tools and
//! exposes each as a [`Capability`] invocable from blocking or async host
//! code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │     host     │────▶│  GatewayClient  │────▶│   gateway   │
//! │ (agent loop) │◀────│  (capabilities) │◀────│   (tools)   │
//! └──────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! Every discovery sweep and every tool call is a self-contained unit of
//! work: it opens a fresh [`GatewaySession`], performs exactly one logical
//! operation, and tears the session down. No connection state is shared
//! between calls, so concurrent invocations need no external locking.
//!
//! # Example
//!
//! ```no_run
//! use gatelink_gateway::{GatewayClient, GatewayConfig};
//!
//! # async fn example() -> gatelink_gateway::GatewayResult<()> {
//! let config = GatewayConfig::from_env()?;
//! let client = GatewayClient::connect(config).await?;
//!
//! for capability in client.capabilities() {
//!     println!("{}: {}", capability.name(), capability.description());
//! }
//!
//! if let Some(search) = client.capability("x_amz_bedrock_agentcore_search") {
//!     let mut args = serde_json::Map::new();
//!     args.insert("query".into(), serde_json::json!("quarterly revenue"));
//!     println!("{}", search.invoke(args).await);
//! }
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod catalog;
mod client;
pub mod config;
mod error;
pub mod http;
pub mod invoker;
pub mod protocol;
pub mod session;
pub mod store;
mod transport;

pub use capability::Capability;
pub use client::{GatewayClient, GatewayInfo, ToolSummary};
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::{GatewayEndpoint, StreamableHttpTransport};
pub use invoker::{ToolCallRequest, ToolOutcome, ToolPayload};
pub use protocol::ToolDescriptor;
pub use session::GatewaySession;
pub use store::SessionStore;
pub use transport::Transport;
