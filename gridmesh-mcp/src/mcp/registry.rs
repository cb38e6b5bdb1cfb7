/// Tool registry and handler contract
///
/// Each exposed capability implements the `ToolHandler` trait and is
/// registered under its stable name at startup. The registry is immutable
/// after construction and shared across requests behind an `Arc`; handlers
/// hold no per-call state, so concurrent invocations are independent.
///
/// # Handler Contract
///
/// All handlers must:
/// 1. Implement the `ToolHandler` trait (async)
/// 2. Accept a `ToolContext` with the inbound headers and parsed arguments
/// 3. Resolve credentials and construct clients fresh per call
/// 4. Map failures to `ToolError` with a caller-safe message
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
/// use gridmesh_mcp::error::ToolResult;
/// use gridmesh_mcp::mcp::protocol::ToolDef;
/// use gridmesh_mcp::mcp::{ToolContext, ToolHandler, ToolRegistry};
///
/// struct Echo;
///
/// #[async_trait]
/// impl ToolHandler for Echo {
///     fn definition(&self) -> ToolDef {
///         ToolDef {
///             name: "echo".to_string(),
///             description: "Echoes its arguments".to_string(),
///             input_schema: json!({"type": "object"}),
///         }
///     }
///
///     async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
///         Ok(ctx.args)
///     }
/// }
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(Echo));
/// ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde_json::Value;

use crate::config::Config;
use crate::error::ToolResult;
use crate::mcp::protocol::ToolDef;

/// Per-invocation context handed to a tool handler
///
/// Built fresh for every `tools/call`; nothing in it outlives the call.
pub struct ToolContext {
    /// Headers of the inbound HTTP request (credential source)
    pub headers: HeaderMap,

    /// Parsed `arguments` object of the call
    pub args: Value,

    /// Shared server configuration
    pub config: Arc<Config>,
}

/// Contract implemented by every exposed tool
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The tool's advertised definition (name, description, schema)
    fn definition(&self) -> ToolDef;

    /// Executes one invocation
    async fn call(&self, ctx: ToolContext) -> ToolResult<Value>;
}

/// Registry of tools, in registration order
pub struct ToolRegistry {
    tools: Vec<Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registers a tool handler
    pub fn register(&mut self, handler: Box<dyn ToolHandler>) {
        self.tools.push(handler);
    }

    /// Definitions of all registered tools, in registration order
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Looks up a handler by its stable name
    pub fn get(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.tools
            .iter()
            .find(|tool| tool.definition().name == name)
            .map(|tool| tool.as_ref())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Dummy(&'static str);

    #[async_trait]
    impl ToolHandler for Dummy {
        fn definition(&self) -> ToolDef {
            ToolDef {
                name: self.0.to_string(),
                description: "dummy".to_string(),
                input_schema: json!({"type": "object"}),
            }
        }

        async fn call(&self, _ctx: ToolContext) -> ToolResult<Value> {
            Ok(json!({"ok": true}))
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Dummy("first")));
        registry.register(Box::new(Dummy("second")));

        assert!(registry.get("first").is_some());
        assert!(registry.get("missing").is_none());

        let names: Vec<String> = registry
            .definitions()
            .into_iter()
            .map(|def| def.name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
