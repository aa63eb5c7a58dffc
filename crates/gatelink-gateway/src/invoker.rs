//! Tool invocation and result normalization.
//!
//! The gateway is inconsistent about result shape: structured content,
//! plain text items, or nothing at all. Everything normalizes into a
//! [`ToolOutcome`] so the host sees exactly one of success-with-payload or
//! failure-with-reason. The invoker itself never returns an error: failures
//! are data, reported upward and never swallowed.

use crate::error::{GatewayError, GatewayResult};
use crate::http::GatewayEndpoint;
use crate::protocol::{CallToolParams, CallToolResult, ToolContent};
use crate::session::GatewaySession;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Tools with argument constraints known ahead of the gateway's own
/// validation. Checked before any network I/O.
const REQUIRED_ARGUMENTS: &[(&str, &[&str])] =
    &[("x_amz_bedrock_agentcore_search", &["query"])];

/// One tool call: name plus argument mapping. Built per call, not persisted.
#[derive(Debug, Clone)]
pub struct ToolCallRequest {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Payload of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPayload {
    /// Structured document returned by the tool.
    Structured(Value),
    /// Plain text returned by the tool.
    Text(String),
    /// The tool ran but produced nothing to report. A success, not an error.
    Empty,
}

/// Normalized result of one tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(ToolPayload),
    Failure { reason: String },
}

impl ToolOutcome {
    /// Create a failure outcome.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Whether the call succeeded.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Render the outcome as a host-readable string.
    pub fn render(&self, tool: &str) -> String {
        match self {
            Self::Success(ToolPayload::Structured(value)) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Success(ToolPayload::Text(text)) => text.clone(),
            Self::Success(ToolPayload::Empty) => {
                format!("tool '{tool}' completed with an empty result")
            }
            Self::Failure { reason } => reason.clone(),
        }
    }
}

/// Check the required-argument table for the given tool.
///
/// An argument counts as present when it exists, is not null, and is not an
/// empty (or whitespace-only) string.
pub fn validate_arguments(name: &str, arguments: &Map<String, Value>) -> GatewayResult<()> {
    for (tool, required) in REQUIRED_ARGUMENTS {
        if *tool != name {
            continue;
        }
        for field in *required {
            let present = match arguments.get(*field) {
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Null) | None => false,
                Some(_) => true,
            };
            if !present {
                return Err(GatewayError::Validation {
                    tool: name.to_string(),
                    message: format!("missing required argument '{field}'"),
                });
            }
        }
    }
    Ok(())
}

/// Call one tool over a fresh session and normalize the response.
///
/// Never fails: validation violations, transport failures, and
/// gateway-reported tool errors all become [`ToolOutcome::Failure`] with a
/// reason naming the tool. No retries.
pub async fn call(endpoint: &GatewayEndpoint, request: &ToolCallRequest) -> ToolOutcome {
    if let Err(e) = validate_arguments(&request.name, &request.arguments) {
        debug!(tool = %request.name, "argument validation failed");
        return ToolOutcome::failure(e.to_string());
    }

    match dispatch(endpoint, request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(tool = %request.name, error = %e, "tool call failed");
            ToolOutcome::failure(format!("tool '{}' failed: {e}", request.name))
        }
    }
}

/// Open a session, send `tools/call`, close the session.
async fn dispatch(
    endpoint: &GatewayEndpoint,
    request: &ToolCallRequest,
) -> GatewayResult<ToolOutcome> {
    let params = serde_json::to_value(CallToolParams {
        name: request.name.clone(),
        arguments: Some(Value::Object(request.arguments.clone())),
    })?;

    let session = GatewaySession::open(endpoint).await?;
    let result = session.request("tools/call", Some(params)).await;
    session.close().await;

    let raw: CallToolResult = serde_json::from_value(result?)
        .map_err(|e| GatewayError::protocol(format!("malformed tool result: {e}")))?;

    Ok(normalize(&request.name, raw))
}

/// Classify a raw gateway result into the normalized outcome.
fn normalize(tool: &str, raw: CallToolResult) -> ToolOutcome {
    let text = collect_text(&raw.content);

    if raw.is_error {
        let reason = if text.is_empty() {
            "unspecified tool error".to_string()
        } else {
            text
        };
        return ToolOutcome::failure(format!("tool '{tool}' reported an error: {reason}"));
    }

    if let Some(structured) = raw.structured_content {
        if !structured.is_null() {
            return ToolOutcome::Success(ToolPayload::Structured(structured));
        }
    }

    if !text.is_empty() {
        return ToolOutcome::Success(ToolPayload::Text(text));
    }

    ToolOutcome::Success(ToolPayload::Empty)
}

fn collect_text(content: &[ToolContent]) -> String {
    let mut parts = Vec::new();
    for item in content {
        match item {
            ToolContent::Text { text } if !text.is_empty() => parts.push(text.as_str()),
            ToolContent::Resource { resource } => {
                if let Some(text) = resource.text.as_deref() {
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
            _ => {}
        }
    }
    parts.join("\n")
}
