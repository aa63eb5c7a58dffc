//! Streamable HTTP transport.
//!
//! Requests go out as HTTP POST carrying one JSON-RPC frame; the gateway
//! answers either with plain JSON or with an SSE stream whose `data:` lines
//! carry JSON-RPC frames. Both shapes are handled transparently.

use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Header carrying the gateway-assigned session id.
const SESSION_ID_HEADER: &str = "Mcp-Session-Id";

/// Default bound on a single gateway request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// One gateway endpoint plus the bearer token authorizing requests to it.
///
/// Cheap to clone; each [`Capability`] holds its own copy.
///
/// [`Capability`]: crate::capability::Capability
#[derive(Clone)]
pub struct GatewayEndpoint {
    /// Gateway URL.
    pub url: String,
    /// Bearer access token.
    pub access_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayEndpoint {
    /// Create an endpoint with the default request timeout.
    pub fn new(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Manual impl so the token never leaks through debug logging.
impl fmt::Debug for GatewayEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayEndpoint")
            .field("url", &self.url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP transport bound to one endpoint for the lifetime of one session.
pub struct StreamableHttpTransport {
    endpoint: GatewayEndpoint,
    client: Client,
    /// Session id issued by the gateway, echoed on subsequent requests.
    session_id: RwLock<Option<String>>,
}

impl StreamableHttpTransport {
    /// Create a transport for the given endpoint.
    pub fn new(endpoint: GatewayEndpoint) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| GatewayError::connection(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint,
            client,
            session_id: RwLock::new(None),
        })
    }

    fn build_request(&self, body: String, session_id: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .post(&self.endpoint.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, text/event-stream")
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.endpoint.access_token),
            )
            .body(body);

        if let Some(id) = session_id {
            req = req.header(SESSION_ID_HEADER, id);
        }

        req
    }

    async fn record_session_id(&self, response: &reqwest::Response) {
        if let Some(id) = response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            *self.session_id.write().await = Some(id.to_string());
        }
    }

    async fn read_response(&self, response: reqwest::Response) -> GatewayResult<JsonRpcResponse> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::protocol(format!(
                "gateway returned {status}: {body}"
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.contains("text/event-stream") {
            self.read_event_stream(response).await
        } else {
            let body = response
                .text()
                .await
                .map_err(|e| GatewayError::protocol(format!("failed to read response: {e}")))?;
            serde_json::from_str(&body)
                .map_err(|e| GatewayError::protocol(format!("invalid gateway response: {e}")))
        }
    }

    /// Scan the SSE stream for the first JSON-RPC frame answering a request.
    /// Server-initiated frames (no id) are skipped.
    async fn read_event_stream(
        &self,
        response: reqwest::Response,
    ) -> GatewayResult<JsonRpcResponse> {
        use futures::StreamExt;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk =
                chunk.map_err(|e| GatewayError::protocol(format!("event stream error: {e}")))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(pos) = buffer.find('\n') {
                let line = buffer[..pos].trim_end_matches('\r').to_string();
                buffer.drain(..=pos);

                let Some(data) = line.strip_prefix("data:") else {
                    continue;
                };
                if let Ok(parsed) = serde_json::from_str::<JsonRpcResponse>(data.trim()) {
                    if parsed.id.is_some() || parsed.error.is_some() {
                        return Ok(parsed);
                    }
                }
            }
        }

        Err(GatewayError::protocol(
            "event stream ended without a response",
        ))
    }
}

fn classify_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::connection(e.to_string())
    } else {
        GatewayError::protocol(format!("request failed: {e}"))
    }
}

#[async_trait]
impl Transport for StreamableHttpTransport {
    async fn request(&self, request: JsonRpcRequest) -> GatewayResult<JsonRpcResponse> {
        let body = serde_json::to_string(&request)?;
        debug!(id = request.id, method = %request.method, "sending gateway request");

        let session_id = self.session_id.read().await.clone();
        let response = self
            .build_request(body, session_id.as_deref())
            .send()
            .await
            .map_err(classify_send_error)?;

        self.record_session_id(&response).await;
        self.read_response(response).await
    }

    async fn notify(&self, notification: JsonRpcNotification) -> GatewayResult<()> {
        let body = serde_json::to_string(&notification)?;
        debug!(method = %notification.method, "sending gateway notification");

        let session_id = self.session_id.read().await.clone();
        let response = self
            .build_request(body, session_id.as_deref())
            .send()
            .await
            .map_err(classify_send_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if !response.status().is_success() {
            warn!(status = %response.status(), "notification returned non-success status");
        }

        Ok(())
    }

    async fn close(&self) -> GatewayResult<()> {
        // Best effort: tell the gateway the session is finished. The session
        // is already logically over, so delivery failures are only logged.
        if let Some(id) = self.session_id.write().await.take() {
            let result = self
                .client
                .delete(&self.endpoint.url)
                .header(SESSION_ID_HEADER, &id)
                .header(
                    AUTHORIZATION,
                    format!("Bearer {}", self.endpoint.access_token),
                )
                .send()
                .await;
            if let Err(e) = result {
                debug!(error = %e, "session delete failed");
            }
        }
        debug!("closed gateway transport");
        Ok(())
    }
}
