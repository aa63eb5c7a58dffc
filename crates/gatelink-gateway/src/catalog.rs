//! Cursor-paginated tool discovery.

use crate::error::{GatewayError, GatewayResult};
use crate::http::GatewayEndpoint;
use crate::protocol::{ListToolsParams, ListToolsResult, ToolDescriptor};
use crate::session::GatewaySession;
use tracing::debug;

/// Sweep the full catalog over an already-open session.
///
/// Pages are requested with `cursor = None` first, then with each returned
/// `nextCursor` until the gateway omits it. Descriptors accumulate in
/// gateway order; no client-side reordering or deduplication. A page with
/// zero descriptors but a present cursor continues the sweep. A cursor
/// identical to the one just consumed is a protocol violation and fails the
/// sweep rather than looping.
///
/// Discovery fails atomically: on any error the pages accumulated so far
/// are discarded, never returned as a truncated success.
pub async fn list_tools(session: &GatewaySession) -> GatewayResult<Vec<ToolDescriptor>> {
    let mut tools = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let params = serde_json::to_value(ListToolsParams {
            cursor: cursor.clone(),
        })?;

        let result = session
            .request("tools/list", Some(params))
            .await
            .map_err(|e| match e {
                GatewayError::Discovery(_) => e,
                other => GatewayError::discovery(format!("tool listing failed: {other}")),
            })?;

        let page: ListToolsResult = serde_json::from_value(result)
            .map_err(|e| GatewayError::discovery(format!("malformed tool listing: {e}")))?;

        debug!(
            count = page.tools.len(),
            cursor = cursor.as_deref().unwrap_or("-"),
            "received tool page"
        );
        tools.extend(page.tools);

        match page.next_cursor {
            Some(next) => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(GatewayError::discovery(format!(
                        "gateway repeated pagination cursor '{next}'"
                    )));
                }
                cursor = Some(next);
            }
            None => break,
        }
    }

    Ok(tools)
}

/// Open a session, sweep the catalog, and close the session.
///
/// Transport failures while opening surface as discovery errors; a rejected
/// bearer token keeps its authentication classification so the host knows
/// to fetch a fresh token.
pub async fn discover(endpoint: &GatewayEndpoint) -> GatewayResult<Vec<ToolDescriptor>> {
    let session = GatewaySession::open(endpoint).await.map_err(|e| match e {
        GatewayError::Unauthorized => e,
        other => GatewayError::discovery(format!("failed to open discovery session: {other}")),
    })?;
    let result = list_tools(&session).await;
    session.close().await;
    result
}
