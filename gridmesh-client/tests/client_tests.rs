/// Integration tests for the GridMesh API client
///
/// These tests run a fake platform API in-process on an ephemeral port and
/// point a real client at it, verifying:
/// - request shaping (paths, repeated tag params, raw Authorization header)
/// - the shared response contract (error extraction, 204, text bodies)
/// - submission payload passthrough

use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use gridmesh_client::{ApiError, Constant, GridMeshClient, TaskSubmission};

/// What the fake platform saw on the last request
#[derive(Debug, Default, Clone)]
struct Captured {
    authorization: Option<String>,
    content_type: Option<String>,
    query: Option<String>,
    body: Option<Value>,
}

type Capture = Arc<Mutex<Captured>>;

/// Spawns a fake platform API and returns its base URL
async fn spawn_platform(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn record_headers(capture: &Capture, headers: &HeaderMap) {
    let mut captured = capture.lock().unwrap();
    captured.authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    captured.content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
}

#[tokio::test]
async fn test_list_tasks_sends_raw_credential_and_repeated_tags() {
    let capture: Capture = Arc::default();
    let state = capture.clone();

    let router = Router::new().route(
        "/v1/tasks",
        get(
            |State(capture): State<Capture>, headers: HeaderMap, RawQuery(query): RawQuery| async move {
                record_headers(&capture, &headers);
                capture.lock().unwrap().query = query;
                Json(json!([
                    {"uuid": "u-1", "name": "first"},
                    {"uuid": "u-2", "name": "second"}
                ]))
            },
        )
        .with_state(state),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let tags = vec!["render".to_string(), "urgent".to_string()];
    let tasks = client.list_tasks(Some(&tags)).await.unwrap();

    // Remote ordering preserved
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].uuid, "u-1");
    assert_eq!(tasks[1].uuid, "u-2");

    let captured = capture.lock().unwrap().clone();
    // Credential goes out verbatim, not re-prefixed with Bearer
    assert_eq!(captured.authorization.as_deref(), Some("secret-key"));
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    assert_eq!(captured.query.as_deref(), Some("tag=render&tag=urgent"));
}

#[tokio::test]
async fn test_get_task_404_carries_status_and_remote_message() {
    let router = Router::new().route(
        "/v1/tasks/:uuid",
        get(|Path(uuid): Path<String>| async move {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"message": format!("No task with uuid {uuid}")})),
            )
        }),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let err = client.get_task("missing-uuid").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "No task with uuid missing-uuid");
}

#[tokio::test]
async fn test_error_message_falls_back_to_raw_body() {
    let router = Router::new().route(
        "/v1/tasks",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let err = client.list_tasks(None).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message(), "upstream unavailable");
}

#[tokio::test]
async fn test_create_task_posts_submission_payload() {
    let capture: Capture = Arc::default();
    let state = capture.clone();

    let router = Router::new().route(
        "/v1/tasks",
        post(
            |State(capture): State<Capture>, Json(body): Json<Value>| async move {
                capture.lock().unwrap().body = Some(body.clone());
                let mut task = body;
                task["uuid"] = json!("assigned-uuid");
                Json(task)
            },
        )
        .with_state(state),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let submission = TaskSubmission {
        name: "Test Task".to_string(),
        instance_count: Some(4),
        constants: Some(vec![Constant {
            key: "FRAME".to_string(),
            value: "12".to_string(),
        }]),
        ..Default::default()
    };

    let task = client.create_task(&submission).await.unwrap();
    assert_eq!(task.uuid, "assigned-uuid");
    assert_eq!(task.instance_count, Some(4));

    let body = capture.lock().unwrap().body.clone().unwrap();
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["name"], "Test Task");
    assert_eq!(object["instanceCount"], 4);
    assert_eq!(object["constants"][0]["key"], "FRAME");
}

#[tokio::test]
async fn test_delete_task_accepts_204_without_decoding() {
    let router = Router::new().route(
        "/v1/tasks/:uuid",
        delete(|| async { StatusCode::NO_CONTENT }),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    client.delete_task("some-uuid").await.unwrap();
}

#[tokio::test]
async fn test_abort_task_ignores_success_body() {
    // The platform answers abort with a non-JSON body; success must not
    // depend on its shape.
    let router = Router::new().route(
        "/v1/tasks/:uuid/abort",
        post(|| async { (StatusCode::OK, "aborted").into_response() }),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    client.abort_task("some-uuid").await.unwrap();
}

#[tokio::test]
async fn test_stdout_returns_raw_text_and_scopes_instance() {
    let router = Router::new()
        .route(
            "/v1/tasks/:uuid/stdout",
            get(|| async { "whole-task output\n" }),
        )
        .route(
            "/v1/tasks/:uuid/stdout/:instance",
            get(|Path((_, instance)): Path<(String, u32)>| async move {
                format!("instance {instance} output\n")
            }),
        );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let all = client.get_task_stdout("t", None).await.unwrap();
    assert_eq!(all, "whole-task output\n");

    let scoped = client.get_task_stdout("t", Some(3)).await.unwrap();
    assert_eq!(scoped, "instance 3 output\n");
}

#[tokio::test]
async fn test_get_profile_decodes_constants() {
    let router = Router::new().route(
        "/v1/profiles/:name",
        get(|Path(name): Path<String>| async move {
            Json(json!({
                "name": name,
                "constants": [{"key": "DOCKER_REPO", "value": "library/ubuntu"}]
            }))
        }),
    );

    let base_url = spawn_platform(router).await;
    let client = GridMeshClient::new("secret-key", &base_url, "1").unwrap();

    let profile = client.get_profile("docker-batch").await.unwrap();
    assert_eq!(profile.name, "docker-batch");
    assert_eq!(profile.constants[0].key, "DOCKER_REPO");
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Port 9 (discard) on localhost should refuse the connection.
    let client = GridMeshClient::new("secret-key", "http://127.0.0.1:9", "1").unwrap();

    let err = client.list_tasks(None).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
