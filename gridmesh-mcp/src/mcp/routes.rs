/// The `/mcp` JSON-RPC endpoint
///
/// A single POST route receiving JSON-RPC 2.0 requests. Notifications are
/// acknowledged with HTTP 202 and no body; everything else gets a JSON-RPC
/// response. Tool failures are not JSON-RPC errors: they come back as tool
/// results with `isError: true`, matching MCP semantics.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::app::AppState;
use crate::mcp::protocol::{
    self, JsonRpcRequest, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::mcp::registry::ToolContext;

/// MCP endpoint handler
///
/// # Endpoint
///
/// `POST /mcp`
///
/// # Methods
///
/// - `initialize` → protocol version, server info, capabilities
/// - `notifications/initialized` / `initialized` → 202, no body
/// - `ping` → empty result
/// - `tools/list` → registered tool definitions
/// - `tools/call` → dispatch to the named tool handler
pub async fn mcp_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "Rejecting unparseable JSON-RPC body");
            return Json(protocol::error_response(
                None,
                PARSE_ERROR,
                "Request body is not valid JSON-RPC",
            ))
            .into_response();
        }
    };

    // Notifications never receive a JSON-RPC response, known or not.
    if request.is_notification() {
        return StatusCode::ACCEPTED.into_response();
    }

    let id = request.id.clone();
    match request.method.as_str() {
        "initialize" => Json(protocol::response(id, protocol::initialize_result())).into_response(),

        "ping" => Json(protocol::response(id, serde_json::json!({}))).into_response(),

        "tools/list" => {
            let tools = state.registry.definitions();
            Json(protocol::response(
                id,
                serde_json::json!({ "tools": tools }),
            ))
            .into_response()
        }

        "tools/call" => call_tool(&state, headers, id, request.params).await,

        method => Json(protocol::error_response(
            id,
            METHOD_NOT_FOUND,
            &format!("Method not found: {method}"),
        ))
        .into_response(),
    }
}

/// Dispatches a `tools/call` request to the registered handler
async fn call_tool(
    state: &AppState,
    headers: HeaderMap,
    id: Option<Value>,
    params: Option<Value>,
) -> Response {
    let Some(params) = params.as_ref().and_then(Value::as_object) else {
        return Json(protocol::error_response(
            id,
            INVALID_PARAMS,
            "params must be an object",
        ))
        .into_response();
    };

    let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");

    let Some(handler) = state.registry.get(tool_name) else {
        return Json(protocol::error_response(
            id,
            INVALID_PARAMS,
            &format!("Unknown tool: {tool_name}"),
        ))
        .into_response();
    };

    // Some clients send `"arguments": null` for empty-args tools; treat
    // missing/null as `{}` but keep non-object values as-is so handler
    // validation can produce a precise message.
    let args = match params.get("arguments") {
        None | Some(Value::Null) => serde_json::json!({}),
        Some(value) => value.clone(),
    };

    let ctx = ToolContext {
        headers,
        args,
        config: state.config.clone(),
    };

    let result = match handler.call(ctx).await {
        Ok(Value::String(text)) => {
            // Plain-text results (logs) go out unquoted.
            protocol::tool_result(&text, false)
        }
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            protocol::tool_result(&text, false)
        }
        Err(err) => {
            tracing::warn!(tool = tool_name, error = %err, "Tool call failed");
            protocol::tool_result(&err.to_string(), true)
        }
    };

    Json(protocol::response(id, result)).into_response()
}
