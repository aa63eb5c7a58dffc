//! Host-invocable capabilities.
//!
//! A [`Capability`] wraps one discovered tool descriptor together with the
//! endpoint needed to call it. Hosts with a cooperative execution model use
//! [`Capability::invoke`]; hosts that can only call blocking functions use
//! [`Capability::invoke_blocking`], which drives the call on a private
//! runtime so nothing leaks between invocations.

use crate::http::GatewayEndpoint;
use crate::invoker::{self, ToolCallRequest};
use crate::protocol::ToolDescriptor;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// One gateway tool, invocable by the host.
#[derive(Debug, Clone)]
pub struct Capability {
    descriptor: ToolDescriptor,
    endpoint: GatewayEndpoint,
}

impl Capability {
    /// Wrap a discovered descriptor.
    pub fn new(descriptor: ToolDescriptor, endpoint: GatewayEndpoint) -> Self {
        Self {
            descriptor,
            endpoint,
        }
    }

    /// Gateway-assigned tool name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Tool description, with an explicit default when the gateway omits it.
    pub fn description(&self) -> String {
        self.descriptor
            .description
            .clone()
            .unwrap_or_else(|| format!("Remote tool: {}", self.descriptor.name))
    }

    /// JSON Schema for the tool's arguments, when the gateway reported one.
    pub fn input_schema(&self) -> Option<&Value> {
        self.descriptor.input_schema.as_ref()
    }

    /// The underlying descriptor.
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Invoke the tool and render the outcome.
    ///
    /// Opens its own session; no connection is held between calls. Always
    /// returns a readable string - failures become error text, so a broken
    /// tool never aborts the host's control flow.
    pub async fn invoke(&self, arguments: Map<String, Value>) -> String {
        let request = ToolCallRequest::new(self.descriptor.name.clone(), arguments);
        debug!(tool = %request.name, "invoking gateway tool");

        let outcome = invoker::call(&self.endpoint, &request).await;
        if !outcome.succeeded() {
            warn!(tool = %request.name, "gateway tool call failed");
        }
        outcome.render(&request.name)
    }

    /// Blocking form of [`invoke`](Self::invoke).
    ///
    /// Builds a current-thread runtime private to this call, runs the async
    /// invocation to completion, and drops the runtime before returning -
    /// no task or timer survives the call, and concurrent blocking calls
    /// from different threads share no state.
    ///
    /// Must be called from a thread that is not already driving an async
    /// runtime; callers inside a runtime use [`invoke`](Self::invoke).
    pub fn invoke_blocking(&self, arguments: Map<String, Value>) -> String {
        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.invoke(arguments)),
            Err(e) => format!("tool '{}' failed: could not start runtime: {e}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn descriptor(name: &str, description: Option<&str>) -> ToolDescriptor {
        ToolDescriptor {
            name: name.to_string(),
            description: description.map(str::to_string),
            input_schema: Some(json!({"type": "object"})),
        }
    }

    fn endpoint(url: &str) -> GatewayEndpoint {
        GatewayEndpoint::new(url, "test-token")
    }

    #[test]
    fn test_accessors() {
        let capability = Capability::new(
            descriptor("lookup", Some("Look things up")),
            endpoint("https://gateway.example.com/mcp"),
        );
        assert_eq!(capability.name(), "lookup");
        assert_eq!(capability.description(), "Look things up");
        assert!(capability.input_schema().is_some());
    }

    #[test]
    fn test_description_fallback() {
        let capability = Capability::new(
            descriptor("bare", None),
            endpoint("https://gateway.example.com/mcp"),
        );
        assert_eq!(capability.description(), "Remote tool: bare");
    }

    /// Gateway double: handshake plus a text result echoing the argument.
    struct EchoGateway;

    impl Respond for EchoGateway {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: serde_json::Value =
                serde_json::from_slice(&request.body).unwrap_or(serde_json::Value::Null);
            let rpc_method = body.get("method").and_then(|m| m.as_str()).unwrap_or("");
            let id = body.get("id").cloned().unwrap_or(serde_json::Value::Null);

            match rpc_method {
                "initialize" => ResponseTemplate::new(200).set_body_json(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {
                        "protocolVersion": "2025-03-26",
                        "capabilities": {"tools": {"listChanged": false}},
                        "serverInfo": {"name": "mock-gateway"}
                    }
                })),
                "notifications/initialized" => ResponseTemplate::new(202),
                "tools/call" => {
                    let echo = body
                        .pointer("/params/arguments/marker")
                        .and_then(|v| v.as_str())
                        .unwrap_or("no marker")
                        .to_string();
                    ResponseTemplate::new(200).set_body_json(json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "result": {"content": [{"type": "text", "text": echo}]}
                    }))
                }
                _ => ResponseTemplate::new(400),
            }
        }
    }

    async fn echo_gateway() -> (MockServer, GatewayEndpoint) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(EchoGateway)
            .mount(&server)
            .await;
        let ep = endpoint(&server.uri());
        (server, ep)
    }

    fn marker_args(value: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("marker".to_string(), json!(value));
        map
    }

    #[tokio::test]
    async fn test_invoke_renders_text() {
        let (_server, ep) = echo_gateway().await;
        let capability = Capability::new(descriptor("echo", None), ep);

        let result = capability.invoke(marker_args("hello")).await;
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_invoke_failure_is_readable_string() {
        let ep = endpoint("http://127.0.0.1:1")
            .with_timeout(std::time::Duration::from_secs(1));
        let capability = Capability::new(descriptor("echo", None), ep);

        let result = capability.invoke(Map::new()).await;
        assert!(result.contains("echo"));
        assert!(result.contains("failed"));
    }

    #[test]
    fn test_invoke_blocking_from_plain_thread() {
        // MockServer needs a runtime; keep it alive for the whole test while
        // the blocking call runs on runtime-free threads.
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (_server, ep) = runtime.block_on(echo_gateway());
        let capability = Capability::new(descriptor("echo", None), ep);

        let handle = std::thread::spawn(move || capability.invoke_blocking(marker_args("blocked")));
        assert_eq!(handle.join().unwrap(), "blocked");
    }

    #[test]
    fn test_concurrent_blocking_invocations_are_independent() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (_server, ep) = runtime.block_on(echo_gateway());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let capability = Capability::new(descriptor("echo", None), ep.clone());
                std::thread::spawn(move || {
                    let marker = format!("call-{i}");
                    (marker.clone(), capability.invoke_blocking(marker_args(&marker)))
                })
            })
            .collect();

        for handle in handles {
            let (expected, actual) = handle.join().unwrap();
            assert_eq!(actual, expected);
        }
    }
}
