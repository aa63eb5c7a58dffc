//! Gateway transport abstraction.

use crate::error::GatewayResult;
use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use async_trait::async_trait;

/// Transport carrying JSON-RPC traffic to one gateway endpoint.
///
/// A transport instance is scoped to a single [`GatewaySession`]: it is
/// created for one discovery sweep or one tool call, then closed. Nothing
/// is shared between instances, so concurrent sessions are independent.
///
/// [`GatewaySession`]: crate::session::GatewaySession
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for its response.
    async fn request(&self, request: JsonRpcRequest) -> GatewayResult<JsonRpcResponse>;

    /// Send a notification (no response expected).
    async fn notify(&self, notification: JsonRpcNotification) -> GatewayResult<()>;

    /// Tear the transport down. Idempotent; errors are not actionable.
    async fn close(&self) -> GatewayResult<()>;
}
