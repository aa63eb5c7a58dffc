//! Gateway wire protocol types.
//!
//! The gateway speaks JSON-RPC 2.0: `initialize` opens a session,
//! `tools/list` pages through the catalog, `tools/call` invokes one tool.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision sent during the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// JSON-RPC request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request.
    pub fn new(id: u64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC notification (no id, no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    /// Create a new JSON-RPC notification.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response.
///
/// `id` is optional so that server-initiated frames interleaved on an event
/// stream deserialize instead of aborting the read; the transport skips
/// frames without an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Initialize request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    pub client_info: ClientInfo,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ClientCapabilities::default(),
            client_info: ClientInfo::default(),
        }
    }
}

/// Client capabilities advertised during initialization.
///
/// Gatelink only consumes tools, so it advertises none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCapabilities {}

/// Client identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            name: "gatelink".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Initialize response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Capabilities advertised by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

/// Gateway identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One remotely-defined tool as reported by the gateway.
///
/// Immutable once fetched. Optional fields stay typed as `Option`; defaults
/// are applied explicitly at the point of use, never probed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Gateway-assigned tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// `tools/list` request parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListToolsParams {
    /// Opaque pagination cursor; absent on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One page of the tool catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListToolsResult {
    pub tools: Vec<ToolDescriptor>,
    /// Cursor for the next page; absent when this page is the last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// `tools/call` request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

/// Raw `tools/call` response before normalization.
///
/// Gateways are inconsistent about result shape: structured content, plain
/// text items, or nothing at all. All fields default so every shape parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(default)]
    pub is_error: bool,
}

/// Content item in a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image")]
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    #[serde(rename = "resource")]
    Resource { resource: ResourceContent },
}

/// Embedded resource content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = JsonRpcRequest::new(7, "tools/list", Some(serde_json::json!({"cursor": "c1"})));
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"method\":\"tools/list\""));
    }

    #[test]
    fn test_notification_has_no_id() {
        let notification = JsonRpcNotification::new("notifications/initialized", None);
        let json = serde_json::to_string(&notification).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("\"params\""));
    }

    #[test]
    fn test_response_without_id_parses() {
        let json = r#"{"jsonrpc": "2.0", "method": "notifications/progress"}"#;
        let parsed: JsonRpcResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.id.is_none());
    }

    #[test]
    fn test_initialize_params_default() {
        let params = InitializeParams::default();
        assert_eq!(params.protocol_version, PROTOCOL_VERSION);
        assert_eq!(params.client_info.name, "gatelink");
    }

    #[test]
    fn test_list_tools_params_skip_absent_cursor() {
        let params = ListToolsParams::default();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, "{}");

        let params = ListToolsParams {
            cursor: Some("c1".to_string()),
        };
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"cursor\":\"c1\""));
    }

    #[test]
    fn test_list_tools_result_next_cursor() {
        let json = r#"{"tools": [{"name": "toolA"}], "nextCursor": "c1"}"#;
        let parsed: ListToolsResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.tools.len(), 1);
        assert_eq!(parsed.next_cursor.as_deref(), Some("c1"));

        let json = r#"{"tools": []}"#;
        let parsed: ListToolsResult = serde_json::from_str(json).unwrap();
        assert!(parsed.next_cursor.is_none());
    }

    #[test]
    fn test_tool_descriptor_optional_fields() {
        let json = r#"{"name": "bare"}"#;
        let parsed: ToolDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "bare");
        assert!(parsed.description.is_none());
        assert!(parsed.input_schema.is_none());

        let json = r#"{"name": "full", "description": "d", "inputSchema": {"type": "object"}}"#;
        let parsed: ToolDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.description.as_deref(), Some("d"));
        assert!(parsed.input_schema.is_some());
    }

    #[test]
    fn test_call_tool_result_shapes() {
        // Structured content
        let json = r#"{"content": [], "structuredContent": {"rows": [1, 2]}}"#;
        let parsed: CallToolResult = serde_json::from_str(json).unwrap();
        assert!(parsed.structured_content.is_some());
        assert!(!parsed.is_error);

        // Text content
        let json = r#"{"content": [{"type": "text", "text": "42"}]}"#;
        let parsed: CallToolResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content.len(), 1);

        // Empty success
        let parsed: CallToolResult = serde_json::from_str("{}").unwrap();
        assert!(parsed.content.is_empty());
        assert!(parsed.structured_content.is_none());

        // Gateway-reported error
        let json = r#"{"content": [{"type": "text", "text": "boom"}], "isError": true}"#;
        let parsed: CallToolResult = serde_json::from_str(json).unwrap();
        assert!(parsed.is_error);
    }

    #[test]
    fn test_tool_content_variants() {
        let json = r#"{"type": "text", "text": "hello"}"#;
        let content: ToolContent = serde_json::from_str(json).unwrap();
        assert!(matches!(content, ToolContent::Text { .. }));

        let json = r#"{"type": "resource", "resource": {"uri": "s3://bucket/key", "text": "x"}}"#;
        let content: ToolContent = serde_json::from_str(json).unwrap();
        match content {
            ToolContent::Resource { resource } => {
                assert_eq!(resource.uri, "s3://bucket/key");
                assert_eq!(resource.text.as_deref(), Some("x"));
            }
            other => panic!("expected resource, got {other:?}"),
        }
    }
}
