//! Tests for the HTTP API
//!
//! These tests drive the router in-process and verify:
//! - Status codes for every route
//! - Validation messages
//! - Search via query string
//! - Toggle completion through PATCH
//! - Malformed bodies and failed snapshot writes

use std::fs;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use taskstore::http::router;
use taskstore::tasks::Task;
use taskstore::{Database, TaskService};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_app() -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open_path(temp_dir.path()).unwrap();
    (temp_dir, router(TaskService::new(db)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn create(app: &Router, title: &str, description: &str) -> Task {
    let (status, body) = send(
        app,
        Method::POST,
        "/tasks",
        Some(json!({ "title": title, "description": description })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

async fn list(app: &Router, uri: &str) -> Vec<Task> {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// POST /tasks
// =============================================================================

#[tokio::test]
async fn test_create_returns_created_task() {
    let (_temp, app) = setup_app();

    let task = create(&app, "Buy milk", "2%").await;

    assert_eq!(task.title, "Buy milk");
    assert!(task.completed_at.is_none());
    assert_eq!(list(&app, "/tasks").await, vec![task]);
}

#[tokio::test]
async fn test_create_missing_title() {
    let (_temp, app) = setup_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "description": "d" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!("Title is required"));
}

#[tokio::test]
async fn test_create_missing_description() {
    let (_temp, app) = setup_app();

    let (status, body) = send(&app, Method::POST, "/tasks", Some(json!({ "title": "t" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!("Description is required")
    );
}

// =============================================================================
// GET /tasks
// =============================================================================

#[tokio::test]
async fn test_list_with_search() {
    let (_temp, app) = setup_app();
    create(&app, "Buy milk", "dairy").await;
    create(&app, "Walk dog", "park").await;

    let found = list(&app, "/tasks?search=milk").await;
    let all = list(&app, "/tasks").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Buy milk");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_get_one() {
    let (_temp, app) = setup_app();
    let task = create(&app, "t", "d").await;

    let (status, body) = send(&app, Method::GET, &format!("/tasks/{}", task.id), None).await;
    let (missing, _) = send(&app, Method::GET, "/tasks/nope", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Task>(&body).unwrap(), task);
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

// =============================================================================
// PUT /tasks/:id
// =============================================================================

#[tokio::test]
async fn test_update() {
    let (_temp, app) = setup_app();
    let task = create(&app, "old", "old").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{}", task.id),
        Some(json!({ "title": "new", "description": "new" })),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let listed = list(&app, "/tasks").await;
    assert_eq!(listed[0].title, "new");
    assert_eq!(listed[0].created_at, task.created_at);
}

#[tokio::test]
async fn test_update_validation_and_not_found() {
    let (_temp, app) = setup_app();
    let task = create(&app, "t", "d").await;

    let (invalid, body) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{}", task.id),
        Some(json!({ "title": "only" })),
    )
    .await;
    let (missing, _) = send(
        &app,
        Method::PUT,
        "/tasks/nope",
        Some(json!({ "title": "t", "description": "d" })),
    )
    .await;

    assert_eq!(invalid, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!("Title or Description must be filled")
    );
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

// =============================================================================
// PATCH /tasks/:id/complete
// =============================================================================

#[tokio::test]
async fn test_complete_toggles() {
    let (_temp, app) = setup_app();
    let task = create(&app, "Buy milk", "2%").await;
    let uri = format!("/tasks/{}/complete", task.id);

    let (first, _) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert!(list(&app, "/tasks").await[0].completed_at.is_some());

    let (second, _) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(second, StatusCode::NO_CONTENT);
    assert!(list(&app, "/tasks").await[0].completed_at.is_none());
}

#[tokio::test]
async fn test_complete_not_found() {
    let (_temp, app) = setup_app();

    let (status, _) = send(&app, Method::PATCH, "/tasks/nope/complete", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// DELETE /tasks/:id
// =============================================================================

#[tokio::test]
async fn test_delete() {
    let (_temp, app) = setup_app();
    let task = create(&app, "t", "d").await;
    let uri = format!("/tasks/{}", task.id);

    let (first, _) = send(&app, Method::DELETE, &uri, None).await;
    let (second, _) = send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert!(list(&app, "/tasks").await.is_empty());
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_wrongly_typed_body_is_bad_request() {
    let (_temp, app) = setup_app();
    let task = create(&app, "t", "d").await;

    let (post, post_body) = send(
        &app,
        Method::POST,
        "/tasks",
        Some(json!({ "title": "a", "description": 5 })),
    )
    .await;
    let (put, put_body) = send(
        &app,
        Method::PUT,
        &format!("/tasks/{}", task.id),
        Some(json!({ "title": ["a"], "description": "d" })),
    )
    .await;

    assert_eq!(post, StatusCode::BAD_REQUEST);
    assert_eq!(put, StatusCode::BAD_REQUEST);
    for body in [post_body, put_body] {
        let message = serde_json::from_slice::<Value>(&body).unwrap();
        assert!(message.is_string(), "expected JSON string, got {}", message);
    }
    assert_eq!(list(&app, "/tasks").await, vec![task]);
}

#[tokio::test]
async fn test_failed_snapshot_write_is_internal_error() {
    let (temp, app) = setup_app();
    let task = create(&app, "t", "d").await;
    let before = list(&app, "/tasks").await;

    // A directory where the staging file should go makes every write fail
    fs::create_dir(temp.path().join("db.json.tmp")).unwrap();

    let requests = [
        (
            Method::POST,
            "/tasks".to_string(),
            Some(json!({ "title": "new", "description": "new" })),
        ),
        (
            Method::PUT,
            format!("/tasks/{}", task.id),
            Some(json!({ "title": "changed", "description": "changed" })),
        ),
        (Method::PATCH, format!("/tasks/{}/complete", task.id), None),
        (Method::DELETE, format!("/tasks/{}", task.id), None),
    ];

    for (method, uri, body) in requests {
        let (status, response) = send(&app, method.clone(), &uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(
            serde_json::from_slice::<Value>(&response).unwrap(),
            json!("Internal server error")
        );
    }

    assert_eq!(list(&app, "/tasks").await, before);
}
