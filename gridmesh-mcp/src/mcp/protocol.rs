/// JSON-RPC 2.0 and MCP wire types
///
/// Shapes follow the MCP specification: tool definitions carry a
/// camelCase `inputSchema`, tool results are a `content` array of text
/// blocks plus an `isError` flag, and notifications (requests without an
/// id) never receive a response.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC error: request body was not valid JSON
pub const PARSE_ERROR: i64 = -32700;

/// JSON-RPC error: method does not exist
pub const METHOD_NOT_FOUND: i64 = -32601;

/// JSON-RPC error: params malformed (wrong type, unknown tool)
pub const INVALID_PARAMS: i64 = -32602;

/// An inbound JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Request id; absent or null marks a notification
    #[serde(default)]
    pub id: Option<Value>,

    /// Method name (e.g. `tools/call`)
    pub method: String,

    /// Method parameters
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// True when the request must not receive a response
    pub fn is_notification(&self) -> bool {
        matches!(&self.id, None | Some(Value::Null))
    }
}

/// A tool definition as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDef {
    /// Stable tool name
    pub name: String,

    /// Human-readable description shown to the agent
    pub description: String,

    /// JSON Schema for the tool's arguments
    pub input_schema: Value,
}

/// Builds a JSON-RPC success response
pub fn response(id: Option<Value>, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id.unwrap_or(Value::Null),
        "result": result,
    })
}

/// Builds a JSON-RPC error response
pub fn error_response(id: Option<Value>, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id.unwrap_or(Value::Null),
        "error": { "code": code, "message": message },
    })
}

/// Builds an MCP tool result with a single text content block
pub fn tool_result(text: &str, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

/// Builds the `initialize` result
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": "gridmesh-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": {}
        },
        "instructions": INSTRUCTIONS,
    })
}

/// Server instructions shown to connecting agents
const INSTRUCTIONS: &str = "\
GridMesh MCP Server provides tools to manage compute tasks on the GridMesh platform.

Available operations:
- List tasks: view all your compute tasks
- Get task details: detailed information about a specific task
- Submit task: create and submit a new compute task
- Get logs: retrieve stdout/stderr from task instances
- Abort task: stop a running task
- Delete task: remove a task
- List profiles: view available computation profiles

Authentication is handled via the API key provided in the request headers.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_detection() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "initialized"})).unwrap();
        assert!(request.is_notification());

        let request: JsonRpcRequest = serde_json::from_value(
            json!({"jsonrpc": "2.0", "id": null, "method": "initialized"}),
        )
        .unwrap();
        assert!(request.is_notification());

        let request: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})).unwrap();
        assert!(!request.is_notification());
    }

    #[test]
    fn test_tool_def_serializes_camel_case_schema() {
        let def = ToolDef {
            name: "list_tasks".to_string(),
            description: "List tasks".to_string(),
            input_schema: json!({"type": "object"}),
        };

        let value = serde_json::to_value(&def).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn test_tool_result_shape() {
        let value = tool_result("hello", false);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "hello");
        assert_eq!(value["isError"], false);
    }

    #[test]
    fn test_error_response_defaults_null_id() {
        let value = error_response(None, PARSE_ERROR, "bad json");
        assert!(value["id"].is_null());
        assert_eq!(value["error"]["code"], -32700);
    }
}
