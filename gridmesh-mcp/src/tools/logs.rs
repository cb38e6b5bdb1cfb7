/// Log retrieval tool
///
/// `get_task_logs` fetches stdout or stderr from a task, optionally scoped
/// to one instance. The log type is validated locally before any remote
/// call; an empty log body is replaced with a descriptive placeholder so
/// the agent can tell "no output yet" from a failed fetch.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ToolError, ToolResult};
use crate::mcp::protocol::ToolDef;
use crate::mcp::{ToolContext, ToolHandler};
use crate::tools::{parse_args, platform_client, FailureMap};

const GET_TASK_LOGS_FAILURES: FailureMap = FailureMap {
    on_status: &[(404, "Task or instance not found: {id}")],
    fallback: "Failed to get logs: {message}",
};

fn default_log_type() -> String {
    "stdout".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GetTaskLogsParams {
    /// UUID of the task
    pub task_uuid: String,

    /// Type of log: "stdout" or "stderr"
    #[serde(default = "default_log_type")]
    pub log_type: String,

    /// Specific instance ID (optional)
    #[serde(default)]
    pub instance_id: Option<u32>,
}

/// Fetches stdout or stderr logs from a task
pub struct GetTaskLogs;

#[async_trait]
impl ToolHandler for GetTaskLogs {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "get_task_logs".to_string(),
            description: "Get stdout or stderr logs from a running or completed task, \
                          optionally filtered by instance ID."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_uuid": {
                        "type": "string",
                        "description": "UUID of the task"
                    },
                    "log_type": {
                        "type": "string",
                        "enum": ["stdout", "stderr"],
                        "default": "stdout",
                        "description": "Type of log: 'stdout' or 'stderr'"
                    },
                    "instance_id": {
                        "type": "integer",
                        "description": "Specific instance ID (optional)"
                    }
                },
                "required": ["task_uuid"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: GetTaskLogsParams = parse_args(&ctx.args)?;
        tracing::info!(
            tool = "get_task_logs",
            task_uuid = %params.task_uuid,
            log_type = %params.log_type,
            instance_id = ?params.instance_id,
            "Tool invoked"
        );

        // Local validation gate: rejected before any credential or remote work.
        if params.log_type != "stdout" && params.log_type != "stderr" {
            return Err(ToolError::InvalidParams(
                "log_type must be 'stdout' or 'stderr'".to_string(),
            ));
        }

        let client = platform_client(&ctx)?;
        let logs = match params.log_type.as_str() {
            "stdout" => client
                .get_task_stdout(&params.task_uuid, params.instance_id)
                .await,
            _ => client
                .get_task_stderr(&params.task_uuid, params.instance_id)
                .await,
        }
        .map_err(|err| GET_TASK_LOGS_FAILURES.apply(err, &params.task_uuid))?;

        tracing::info!(
            tool = "get_task_logs",
            chars = logs.len(),
            log_type = %params.log_type,
            "Logs retrieved"
        );

        if logs.is_empty() {
            return Ok(Value::String(format!(
                "No {} output available",
                params.log_type
            )));
        }
        Ok(Value::String(logs))
    }
}
