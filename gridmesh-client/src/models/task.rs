/// Task model and submission payload
///
/// Tasks are the core entity of the GridMesh platform: a named unit of
/// batch compute work, fanned out over one or more instances, with a
/// lifecycle fully owned by the platform. This client never caches task
/// state; every read is a fresh fetch.
///
/// # Lifecycle
///
/// ```text
/// Submitted → PartiallyDispatched → FullyDispatched → Running
///           → Success | Failure | Cancelled
/// ```
///
/// The exact state vocabulary belongs to the platform and may grow, so
/// `state` is carried as an opaque string rather than an enum.
///
/// # Example
///
/// ```no_run
/// use gridmesh_client::{GridMeshClient, TaskSubmission};
///
/// # async fn example() -> Result<(), gridmesh_client::ApiError> {
/// let client = GridMeshClient::new("my-api-key", "https://api.gridmesh.io", "1")?;
///
/// let submission = TaskSubmission {
///     name: "render-frames".to_string(),
///     profile: Some("docker-batch".to_string()),
///     instance_count: Some(4),
///     ..Default::default()
/// };
///
/// let task = client.create_task(&submission).await?;
/// println!("submitted task {}", task.uuid);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A key/value constant passed to a task's computation environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    /// Constant name
    pub key: String,

    /// Constant value (always a string on the wire)
    pub value: String,
}

/// A compute task as returned by the platform
///
/// Only `uuid` and `name` are guaranteed; everything else is optional so
/// that platform-side additions or omissions never break decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique task identifier assigned at submission
    pub uuid: String,

    /// Task name (for display/logging)
    pub name: String,

    /// Short identifier, if one was supplied at submission
    #[serde(default)]
    pub shortname: Option<String>,

    /// Lifecycle state (platform-owned vocabulary)
    #[serde(default)]
    pub state: Option<String>,

    /// Completion percentage, 0-100
    #[serde(default)]
    pub progress: Option<f64>,

    /// Name of the profile the task runs under
    #[serde(default)]
    pub profile: Option<String>,

    /// Requested number of parallel instances
    #[serde(default)]
    pub instance_count: Option<u32>,

    /// Number of instances currently running
    #[serde(default)]
    pub running_instance_count: Option<u32>,

    /// Submission timestamp
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,

    /// Completion timestamp (null while the task is live)
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    /// Free-form organizational tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Input bucket names attached to the task
    #[serde(default)]
    pub resource_buckets: Option<Vec<String>>,

    /// Output bucket name
    #[serde(default)]
    pub result_bucket: Option<String>,

    /// Constants the task was submitted with
    #[serde(default)]
    pub constants: Option<Vec<Constant>>,
}

/// Reduced task projection used by task listings
///
/// Serialized with snake_case field names for tool consumers, unlike the
/// camelCase platform wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    pub uuid: String,
    pub name: String,
    pub shortname: Option<String>,
    pub state: Option<String>,
    pub progress: Option<f64>,
    pub profile: Option<String>,
    pub instance_count: Option<u32>,
    pub running_instance_count: Option<u32>,
    pub creation_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            uuid: task.uuid,
            name: task.name,
            shortname: task.shortname,
            state: task.state,
            progress: task.progress,
            profile: task.profile,
            instance_count: task.instance_count,
            running_instance_count: task.running_instance_count,
            creation_date: task.creation_date,
            end_date: task.end_date,
            tags: task.tags,
        }
    }
}

/// Payload for task submission
///
/// Optional fields that were not supplied must not appear in the outbound
/// JSON at all (absence, not null), hence `skip_serializing_if` on every
/// optional field.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSubmission {
    /// Task name (required)
    pub name: String,

    /// Short identifier for the task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,

    /// Computation profile to run under (e.g. "docker-batch")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Number of parallel instances (>= 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<u32>,

    /// Input bucket names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_buckets: Option<Vec<String>>,

    /// Output bucket name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_bucket: Option<String>,

    /// Environment constants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constants: Option<Vec<Constant>>,

    /// Organizational tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
