/// HTTP client wrapper for the GridMesh platform API
///
/// `GridMeshClient` translates typed operations into HTTP calls against
/// `{base_url}/v{version}` and typed results. It holds no business logic:
/// parameter validation and error-to-message mapping belong to callers.
///
/// # Scoping
///
/// One client instance is scoped to a single credential. Callers that serve
/// multiple credentials must construct one instance per credential; the
/// underlying connection is established lazily on first use and released
/// when the instance is dropped. Connection reuse within one instance's
/// lifetime is fine.
///
/// # Response contract
///
/// - status >= 400 → [`ApiError::Api`] with the status code and the
///   `message` field of a JSON error body (falling back to raw text)
/// - status 204 → empty result, body never decoded
/// - success bodies are decoded as JSON only when the `Content-Type`
///   says so; otherwise they are returned as raw text
///
/// # Example
///
/// ```no_run
/// use gridmesh_client::GridMeshClient;
///
/// # async fn example() -> Result<(), gridmesh_client::ApiError> {
/// let client = GridMeshClient::new("my-api-key", "https://api.gridmesh.io", "1")?;
/// let tasks = client.list_tasks(None).await?;
/// println!("{} tasks", tasks.len());
/// # Ok(())
/// # }
/// ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{ApiError, ApiResult};
use crate::models::profile::Profile;
use crate::models::task::{Task, TaskSubmission};

/// Per-request deadline applied uniformly to every remote call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Decoded response body
enum ResponseBody {
    /// JSON body (Content-Type indicated JSON)
    Json(JsonValue),

    /// Raw text body
    Text(String),

    /// 204 No Content
    Empty,
}

/// Client for the GridMesh platform API, scoped to one credential
pub struct GridMeshClient {
    http: reqwest::Client,
    credential: String,
    base_path: String,
}

impl GridMeshClient {
    /// Creates a client scoped to `credential`
    ///
    /// Requests target `{base_url}/v{version}`. Every request carries
    /// `Content-Type: application/json` and an `Authorization` header set
    /// to the raw credential (no `Bearer ` prefix re-applied).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(credential: &str, base_url: &str, version: &str) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            credential: credential.to_string(),
            base_path: format!("{}/v{}", base_url.trim_end_matches('/'), version),
        })
    }

    /// Builds the absolute URL for an API path
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    /// Sends a request and applies the shared response contract
    async fn execute(&self, request: reqwest::RequestBuilder) -> ApiResult<ResponseBody> {
        let response = request
            .header(AUTHORIZATION, self.credential.as_str())
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() >= 400 {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(ResponseBody::Empty);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            Ok(ResponseBody::Json(response.json().await?))
        } else {
            Ok(ResponseBody::Text(response.text().await?))
        }
    }

    /// GET a JSON resource and decode it
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.endpoint(path);
        tracing::debug!(method = "GET", url = %url, "GridMesh API request");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        decode(self.execute(request).await?)
    }

    /// GET a text resource (logs)
    async fn get_text(&self, path: &str) -> ApiResult<String> {
        let url = self.endpoint(path);
        tracing::debug!(method = "GET", url = %url, "GridMesh API request");

        match self.execute(self.http.get(&url)).await? {
            ResponseBody::Text(text) => Ok(text),
            ResponseBody::Json(value) => match value {
                JsonValue::String(text) => Ok(text),
                other => Ok(other.to_string()),
            },
            ResponseBody::Empty => Ok(String::new()),
        }
    }

    /// POST a JSON body and decode the JSON response
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let url = self.endpoint(path);
        tracing::debug!(method = "POST", url = %url, "GridMesh API request");

        decode(self.execute(self.http.post(&url).json(body)).await?)
    }

    /// POST with no body, ignoring any success response body
    async fn post_ignore_body(&self, path: &str) -> ApiResult<()> {
        let url = self.endpoint(path);
        tracing::debug!(method = "POST", url = %url, "GridMesh API request");

        self.execute(self.http.post(&url)).await?;
        Ok(())
    }

    /// DELETE, ignoring any success response body
    async fn delete_ignore_body(&self, path: &str) -> ApiResult<()> {
        let url = self.endpoint(path);
        tracing::debug!(method = "DELETE", url = %url, "GridMesh API request");

        self.execute(self.http.delete(&url)).await?;
        Ok(())
    }

    /// Lists tasks for the authenticated user
    ///
    /// Tags, when supplied, are passed as a repeated `tag` query parameter.
    /// Results keep the order the platform returned them in.
    pub async fn list_tasks(&self, tags: Option<&[String]>) -> ApiResult<Vec<Task>> {
        let query: Vec<(&str, &str)> = tags
            .unwrap_or_default()
            .iter()
            .map(|tag| ("tag", tag.as_str()))
            .collect();

        self.get_json("/tasks", &query).await
    }

    /// Fetches a single task by UUID
    pub async fn get_task(&self, task_uuid: &str) -> ApiResult<Task> {
        self.get_json(&format!("/tasks/{task_uuid}"), &[]).await
    }

    /// Submits a new task, returning the created task with its UUID
    pub async fn create_task(&self, submission: &TaskSubmission) -> ApiResult<Task> {
        self.post_json("/tasks", submission).await
    }

    /// Aborts a running task
    ///
    /// A 2xx response is success; the body, if any, is ignored.
    pub async fn abort_task(&self, task_uuid: &str) -> ApiResult<()> {
        self.post_ignore_body(&format!("/tasks/{task_uuid}/abort"))
            .await
    }

    /// Deletes a task (a running task is aborted first by the platform)
    pub async fn delete_task(&self, task_uuid: &str) -> ApiResult<()> {
        self.delete_ignore_body(&format!("/tasks/{task_uuid}")).await
    }

    /// Fetches stdout for a task, optionally scoped to one instance
    pub async fn get_task_stdout(
        &self,
        task_uuid: &str,
        instance_id: Option<u32>,
    ) -> ApiResult<String> {
        self.get_text(&log_path(task_uuid, "stdout", instance_id))
            .await
    }

    /// Fetches stderr for a task, optionally scoped to one instance
    pub async fn get_task_stderr(
        &self,
        task_uuid: &str,
        instance_id: Option<u32>,
    ) -> ApiResult<String> {
        self.get_text(&log_path(task_uuid, "stderr", instance_id))
            .await
    }

    /// Lists available computation profiles
    pub async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
        self.get_json("/profiles", &[]).await
    }

    /// Fetches a single profile by name
    pub async fn get_profile(&self, name: &str) -> ApiResult<Profile> {
        self.get_json(&format!("/profiles/{name}"), &[]).await
    }
}

/// Decodes a response body into the declared return type
fn decode<T: DeserializeOwned>(body: ResponseBody) -> ApiResult<T> {
    let value = match body {
        ResponseBody::Json(value) => value,
        ResponseBody::Text(text) => serde_json::from_str(&text)?,
        ResponseBody::Empty => JsonValue::Null,
    };
    Ok(serde_json::from_value(value)?)
}

/// Extracts the platform error message from an error response body
///
/// Prefers the `message` field of a JSON body; falls back to the raw text.
fn extract_error_message(text: &str) -> String {
    serde_json::from_str::<JsonValue>(text)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| text.to_string())
}

/// Builds the log sub-resource path, optionally instance-scoped
fn log_path(task_uuid: &str, kind: &str, instance_id: Option<u32>) -> String {
    match instance_id {
        Some(instance) => format!("/tasks/{task_uuid}/{kind}/{instance}"),
        None => format!("/tasks/{task_uuid}/{kind}"),
    }
}
