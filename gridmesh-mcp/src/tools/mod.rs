/// Tool handlers exposed over MCP
///
/// Eight tools, each a pure adapter over the GridMesh API client:
/// validate/default parameters → one remote call → shape the result or map
/// the failure. Handlers obtain their credential and client fresh per call
/// and never retry.
///
/// # Tools
///
/// - `list_tasks` - List compute tasks (optionally filtered by tags)
/// - `get_task` - Full details of one task
/// - `submit_task` - Create and submit a new task
/// - `get_task_logs` - Fetch stdout/stderr from a task
/// - `abort_task` - Stop a running task
/// - `delete_task` - Remove a task
/// - `list_profiles` - List computation profiles
/// - `get_profile` - Details of one profile

pub mod logs;
pub mod profiles;
pub mod tasks;

use serde::de::DeserializeOwned;
use serde_json::Value;

use gridmesh_client::{ApiError, GridMeshClient};

use crate::auth::resolve_credential;
use crate::error::{ToolError, ToolResult};
use crate::mcp::{ToolContext, ToolRegistry};

/// Builds the registry of all exposed tools
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(tasks::ListTasks));
    registry.register(Box::new(tasks::GetTask));
    registry.register(Box::new(tasks::SubmitTask));
    registry.register(Box::new(logs::GetTaskLogs));
    registry.register(Box::new(tasks::AbortTask));
    registry.register(Box::new(tasks::DeleteTask));
    registry.register(Box::new(profiles::ListProfiles));
    registry.register(Box::new(profiles::GetProfile));
    registry
}

/// Resolves the caller's credential and builds a client scoped to it
///
/// Called at the top of every handler; the returned client lives for this
/// invocation only and is dropped on every exit path.
pub(crate) fn platform_client(ctx: &ToolContext) -> ToolResult<GridMeshClient> {
    let credential = resolve_credential(&ctx.headers)?;
    GridMeshClient::new(
        &credential,
        &ctx.config.platform.base_url,
        &ctx.config.platform.api_version,
    )
    .map_err(|err| ToolError::Internal(err.to_string()))
}

/// Deserializes tool arguments into a typed parameter struct
pub(crate) fn parse_args<T: DeserializeOwned>(args: &Value) -> ToolResult<T> {
    serde_json::from_value(args.clone())
        .map_err(|err| ToolError::InvalidParams(format!("Invalid parameters: {err}")))
}

/// Serializes a successful result for the MCP layer
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(|err| ToolError::Internal(err.to_string()))
}

/// Declarative status-code-to-message mapping for one operation
///
/// Each operation owns a table of `(status, template)` entries plus a
/// fallback template. Templates may contain `{id}` (replaced with the
/// resource identifier) and the fallback may contain `{message}` (replaced
/// with the remote-supplied message). Keeping the mapping in data makes it
/// testable without any transport mocking.
pub(crate) struct FailureMap {
    /// Specific status entries, checked in order
    pub(crate) on_status: &'static [(u16, &'static str)],

    /// Template for any other remote failure
    pub(crate) fallback: &'static str,
}

impl FailureMap {
    /// Maps an API failure to a caller-facing tool error
    ///
    /// Status 404 entries become [`ToolError::NotFound`], 403 entries
    /// [`ToolError::Forbidden`], anything else [`ToolError::Failed`].
    /// Failures without a status (transport, decode) are unexpected and
    /// surface as [`ToolError::Internal`].
    pub(crate) fn apply(&self, err: ApiError, id: &str) -> ToolError {
        let Some(status) = err.status() else {
            return ToolError::Internal(err.to_string());
        };

        for (code, template) in self.on_status {
            if *code == status {
                let message = template.replace("{id}", id);
                return match *code {
                    404 => ToolError::NotFound(message),
                    403 => ToolError::Forbidden(message),
                    _ => ToolError::Failed(message),
                };
            }
        }

        ToolError::Failed(self.fallback.replace("{message}", &err.message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: FailureMap = FailureMap {
        on_status: &[
            (404, "Task not found: {id}"),
            (403, "Cannot abort task (may already be completed): {id}"),
        ],
        fallback: "Failed to abort task: {message}",
    };

    fn api_error(status: u16, message: &str) -> ApiError {
        ApiError::Api {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_mapped_status_fills_identifier() {
        let err = MAP.apply(api_error(404, "gone"), "task-123");
        assert!(matches!(err, ToolError::NotFound(_)));
        assert_eq!(err.to_string(), "Task not found: task-123");

        let err = MAP.apply(api_error(403, "nope"), "task-123");
        assert!(matches!(err, ToolError::Forbidden(_)));
        assert_eq!(
            err.to_string(),
            "Cannot abort task (may already be completed): task-123"
        );
    }

    #[test]
    fn test_unmapped_status_embeds_remote_message() {
        let err = MAP.apply(api_error(500, "scheduler offline"), "task-123");
        assert!(matches!(err, ToolError::Failed(_)));
        assert_eq!(err.to_string(), "Failed to abort task: scheduler offline");
    }

    #[test]
    fn test_statusless_failure_is_internal() {
        let decode = ApiError::Decode(serde_json::from_str::<u32>("not json").unwrap_err());
        let err = MAP.apply(decode, "task-123");
        assert!(matches!(err, ToolError::Internal(_)));
    }
}
