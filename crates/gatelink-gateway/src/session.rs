//! Per-operation gateway sessions.
//!
//! A [`GatewaySession`] is scoped to exactly one logical operation: a full
//! catalog sweep or a single tool call. Opening performs the protocol
//! initialization handshake; the session is unusable until the handshake
//! succeeds and is closed on every exit path, including handshake failure.
//! Sessions are never reused or pooled, so concurrent operations share no
//! mutable connection state.

use crate::error::{GatewayError, GatewayResult};
use crate::http::{GatewayEndpoint, StreamableHttpTransport};
use crate::protocol::{InitializeParams, InitializeResult, JsonRpcNotification, JsonRpcRequest};
use crate::transport::Transport;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// An initialized session against one gateway endpoint.
pub struct GatewaySession {
    transport: Box<dyn Transport>,
    next_id: AtomicU64,
}

impl GatewaySession {
    /// Open a session: fresh transport plus the initialize handshake.
    pub async fn open(endpoint: &GatewayEndpoint) -> GatewayResult<Self> {
        let transport = StreamableHttpTransport::new(endpoint.clone())?;
        Self::with_transport(Box::new(transport)).await
    }

    /// Open a session over an existing transport. The handshake still runs;
    /// on failure the transport is closed before the error is returned.
    pub async fn with_transport(transport: Box<dyn Transport>) -> GatewayResult<Self> {
        let session = Self {
            transport,
            next_id: AtomicU64::new(1),
        };

        match session.initialize().await {
            Ok(()) => Ok(session),
            Err(e) => {
                session.close().await;
                Err(e)
            }
        }
    }

    async fn initialize(&self) -> GatewayResult<()> {
        let params = serde_json::to_value(InitializeParams::default())?;
        let result = self.request("initialize", Some(params)).await?;

        let init: InitializeResult = serde_json::from_value(result)
            .map_err(|e| GatewayError::init(format!("malformed initialize result: {e}")))?;

        debug!(
            protocol_version = %init.protocol_version,
            gateway = %init.server_info.name,
            "gateway session initialized"
        );

        self.transport
            .notify(JsonRpcNotification::new("notifications/initialized", None))
            .await?;

        Ok(())
    }

    /// Send one request and unwrap the JSON-RPC envelope: a gateway-reported
    /// error becomes [`GatewayError::Rpc`], a missing result a protocol error.
    pub async fn request(&self, method: &str, params: Option<Value>) -> GatewayResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let response = self
            .transport
            .request(JsonRpcRequest::new(id, method, params))
            .await?;

        if let Some(error) = response.error {
            return Err(GatewayError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| GatewayError::protocol(format!("missing result for {method}")))
    }

    /// Tear the session down. Failures are logged, not surfaced: the
    /// operation this session served is already complete or failed.
    pub async fn close(&self) {
        if let Err(e) = self.transport.close().await {
            debug!(error = %e, "gateway session close failed");
        }
    }
}
