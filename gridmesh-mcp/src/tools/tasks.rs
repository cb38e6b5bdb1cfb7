/// Task lifecycle tools
///
/// `list_tasks`, `get_task`, `submit_task`, `abort_task`, and
/// `delete_task`. Listing projects each task to a reduced summary; the
/// other read/submit tools return the platform task verbatim; abort and
/// delete return a status/message acknowledgment.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use gridmesh_client::{Constant, TaskSubmission, TaskSummary};

use crate::error::ToolResult;
use crate::mcp::protocol::ToolDef;
use crate::mcp::{ToolContext, ToolHandler};
use crate::tools::{parse_args, platform_client, to_json, FailureMap};

// ---------------------------------------------------------------------------
// list_tasks

const LIST_TASKS_FAILURES: FailureMap = FailureMap {
    on_status: &[],
    fallback: "Failed to list tasks: {message}",
};

#[derive(Debug, Deserialize)]
pub struct ListTasksParams {
    /// Filter tasks by tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Lists all compute tasks for the authenticated user
pub struct ListTasks;

#[async_trait]
impl ToolHandler for ListTasks {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "list_tasks".to_string(),
            description: "List all compute tasks for the authenticated user. \
                          Returns each task's state, progress, and basic information."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Filter tasks by tags"
                    }
                }
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: ListTasksParams = parse_args(&ctx.args)?;
        tracing::info!(tool = "list_tasks", tags = ?params.tags, "Tool invoked");

        let client = platform_client(&ctx)?;
        let tasks = client
            .list_tasks(params.tags.as_deref())
            .await
            .map_err(|err| LIST_TASKS_FAILURES.apply(err, ""))?;

        let summaries: Vec<TaskSummary> = tasks.into_iter().map(TaskSummary::from).collect();
        tracing::info!(tool = "list_tasks", count = summaries.len(), "Tasks listed");

        to_json(&summaries)
    }
}

// ---------------------------------------------------------------------------
// get_task

const GET_TASK_FAILURES: FailureMap = FailureMap {
    on_status: &[(404, "Task not found: {id}")],
    fallback: "Failed to get task: {message}",
};

#[derive(Debug, Deserialize, Validate)]
pub struct GetTaskParams {
    /// UUID of the task to retrieve
    #[validate(length(min = 1))]
    pub task_uuid: String,
}

/// Fetches full details of one task
pub struct GetTask;

#[async_trait]
impl ToolHandler for GetTask {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "get_task".to_string(),
            description: "Get detailed information about a specific task, including \
                          its state, configuration, and execution details."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_uuid": {
                        "type": "string",
                        "description": "UUID of the task to retrieve"
                    }
                },
                "required": ["task_uuid"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: GetTaskParams = parse_args(&ctx.args)?;
        params.validate()?;
        tracing::info!(tool = "get_task", task_uuid = %params.task_uuid, "Tool invoked");

        let client = platform_client(&ctx)?;
        let task = client
            .get_task(&params.task_uuid)
            .await
            .map_err(|err| GET_TASK_FAILURES.apply(err, &params.task_uuid))?;

        tracing::info!(
            tool = "get_task",
            task_name = %task.name,
            state = ?task.state,
            "Task retrieved"
        );

        to_json(&task)
    }
}

// ---------------------------------------------------------------------------
// submit_task

const SUBMIT_TASK_FAILURES: FailureMap = FailureMap {
    on_status: &[],
    fallback: "Failed to submit task: {message}",
};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTaskParams {
    /// Name of the task (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Computation profile (e.g. "docker-batch")
    #[serde(default)]
    pub profile: Option<String>,

    /// Number of parallel instances
    #[serde(default)]
    #[validate(range(min = 1))]
    pub instance_count: Option<u32>,

    /// Short identifier for the task
    #[serde(default)]
    pub shortname: Option<String>,

    /// Input bucket names
    #[serde(default)]
    pub resource_buckets: Option<Vec<String>>,

    /// Output bucket name
    #[serde(default)]
    pub result_bucket: Option<String>,

    /// Environment constants as {key, value} pairs
    #[serde(default)]
    pub constants: Option<Vec<Constant>>,

    /// Tags for organization
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl SubmitTaskParams {
    /// Builds the outbound submission payload
    ///
    /// Options move across untouched: a field the caller did not supply
    /// stays `None` and is omitted from the serialized payload entirely.
    fn into_submission(self) -> TaskSubmission {
        TaskSubmission {
            name: self.name,
            shortname: self.shortname,
            profile: self.profile,
            instance_count: self.instance_count,
            resource_buckets: self.resource_buckets,
            result_bucket: self.result_bucket,
            constants: self.constants,
            tags: self.tags,
        }
    }
}

/// Creates and submits a new compute task
pub struct SubmitTask;

#[async_trait]
impl ToolHandler for SubmitTask {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "submit_task".to_string(),
            description: "Create and submit a new compute task. Returns the created \
                          task details including its UUID."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Name of the task (required)"
                    },
                    "profile": {
                        "type": "string",
                        "description": "Computation profile (e.g. 'docker-batch')"
                    },
                    "instance_count": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Number of parallel instances"
                    },
                    "shortname": {
                        "type": "string",
                        "description": "Short identifier for the task"
                    },
                    "resource_buckets": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Input bucket names"
                    },
                    "result_bucket": {
                        "type": "string",
                        "description": "Output bucket name"
                    },
                    "constants": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "key": { "type": "string" },
                                "value": { "type": "string" }
                            },
                            "required": ["key", "value"]
                        },
                        "description": "Environment constants as {key, value} pairs"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Tags for organization"
                    }
                },
                "required": ["name"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: SubmitTaskParams = parse_args(&ctx.args)?;
        params.validate()?;
        tracing::info!(
            tool = "submit_task",
            task_name = %params.name,
            profile = ?params.profile,
            "Tool invoked"
        );

        let client = platform_client(&ctx)?;
        let task = client
            .create_task(&params.into_submission())
            .await
            .map_err(|err| SUBMIT_TASK_FAILURES.apply(err, ""))?;

        tracing::info!(tool = "submit_task", task_uuid = %task.uuid, "Task submitted");

        to_json(&task)
    }
}

// ---------------------------------------------------------------------------
// abort_task

const ABORT_TASK_FAILURES: FailureMap = FailureMap {
    on_status: &[
        (404, "Task not found: {id}"),
        (403, "Cannot abort task (may already be completed): {id}"),
    ],
    fallback: "Failed to abort task: {message}",
};

#[derive(Debug, Deserialize, Validate)]
pub struct AbortTaskParams {
    /// UUID of the task to abort
    #[validate(length(min = 1))]
    pub task_uuid: String,
}

/// Stops a running task
pub struct AbortTask;

#[async_trait]
impl ToolHandler for AbortTask {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "abort_task".to_string(),
            description: "Abort a running task. The task state will change to 'Cancelled'."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_uuid": {
                        "type": "string",
                        "description": "UUID of the task to abort"
                    }
                },
                "required": ["task_uuid"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: AbortTaskParams = parse_args(&ctx.args)?;
        params.validate()?;
        tracing::info!(tool = "abort_task", task_uuid = %params.task_uuid, "Tool invoked");

        let client = platform_client(&ctx)?;
        client
            .abort_task(&params.task_uuid)
            .await
            .map_err(|err| ABORT_TASK_FAILURES.apply(err, &params.task_uuid))?;

        tracing::info!(tool = "abort_task", task_uuid = %params.task_uuid, "Task aborted");

        Ok(json!({
            "status": "success",
            "message": format!("Task {} has been aborted", params.task_uuid),
        }))
    }
}

// ---------------------------------------------------------------------------
// delete_task

const DELETE_TASK_FAILURES: FailureMap = FailureMap {
    on_status: &[(404, "Task not found: {id}")],
    fallback: "Failed to delete task: {message}",
};

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteTaskParams {
    /// UUID of the task to delete
    #[validate(length(min = 1))]
    pub task_uuid: String,
}

/// Removes a task (a running task is aborted first by the platform)
pub struct DeleteTask;

#[async_trait]
impl ToolHandler for DeleteTask {
    fn definition(&self) -> ToolDef {
        ToolDef {
            name: "delete_task".to_string(),
            description: "Delete a task. If the task is running, it will be aborted first."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "task_uuid": {
                        "type": "string",
                        "description": "UUID of the task to delete"
                    }
                },
                "required": ["task_uuid"]
            }),
        }
    }

    async fn call(&self, ctx: ToolContext) -> ToolResult<Value> {
        let params: DeleteTaskParams = parse_args(&ctx.args)?;
        params.validate()?;
        tracing::info!(tool = "delete_task", task_uuid = %params.task_uuid, "Tool invoked");

        let client = platform_client(&ctx)?;
        client
            .delete_task(&params.task_uuid)
            .await
            .map_err(|err| DELETE_TASK_FAILURES.apply(err, &params.task_uuid))?;

        tracing::info!(tool = "delete_task", task_uuid = %params.task_uuid, "Task deleted");

        Ok(json!({
            "status": "success",
            "message": format!("Task {} has been deleted", params.task_uuid),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tasks_params_default_to_no_tags() {
        let params: ListTasksParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.tags.is_none());
    }

    #[test]
    fn test_submit_task_rejects_zero_instances() {
        let params: SubmitTaskParams = serde_json::from_value(json!({
            "name": "bad-task",
            "instance_count": 0
        }))
        .unwrap();
        assert!(params.validate().is_err());

        let params: SubmitTaskParams = serde_json::from_value(json!({
            "name": "good-task",
            "instance_count": 1
        }))
        .unwrap();
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_submit_task_rejects_empty_name() {
        let params: SubmitTaskParams = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_submission_keeps_unsupplied_fields_absent() {
        let params: SubmitTaskParams =
            serde_json::from_value(json!({"name": "Test Task"})).unwrap();
        let payload = serde_json::to_value(params.into_submission()).unwrap();

        let object = payload.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["name"], "Test Task");
    }

    #[test]
    fn test_required_fields_advertised_in_schemas() {
        assert_eq!(
            GetTask.definition().input_schema["required"],
            json!(["task_uuid"])
        );
        assert_eq!(
            SubmitTask.definition().input_schema["required"],
            json!(["name"])
        );
        assert!(ListTasks.definition().input_schema.get("required").is_none());
    }
}
