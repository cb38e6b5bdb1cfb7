/// MCP protocol layer
///
/// This module implements the narrow slice of the Model Context Protocol
/// the server needs: JSON-RPC 2.0 over HTTP POST, with `initialize`,
/// `ping`, `tools/list`, and `tools/call`. Tool behavior lives in
/// `crate::tools`; this layer only parses, dispatches, and shapes
/// responses.

pub mod protocol;
pub mod registry;
pub mod routes;

// Re-export main types
pub use registry::{ToolContext, ToolHandler, ToolRegistry};
pub use routes::mcp_endpoint;
