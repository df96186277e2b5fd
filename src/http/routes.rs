//! Route handlers
//!
//! | Method | Path                  | Success               |
//! |--------|-----------------------|-----------------------|
//! | POST   | `/tasks`              | 201 + task            |
//! | GET    | `/tasks?search=`      | 200 + tasks           |
//! | GET    | `/tasks/:id`          | 200 + task            |
//! | PUT    | `/tasks/:id`          | 204                   |
//! | PATCH  | `/tasks/:id/complete` | 204                   |
//! | DELETE | `/tasks/:id`          | 204                   |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::Result;
use crate::tasks::{NewTask, Task, TaskService, TaskUpdate};

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewTask>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<Task>), ApiError> {
    let Json(input) = payload?;
    let task = run_blocking(&state, move |tasks| tasks.create(input)).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> std::result::Result<Json<Vec<Task>>, ApiError> {
    let tasks = run_blocking(&state, move |tasks| tasks.list(query.search.as_deref())).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<Task>, ApiError> {
    let task = run_blocking(&state, move |tasks| tasks.get(&id)).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<TaskUpdate>, JsonRejection>,
) -> std::result::Result<StatusCode, ApiError> {
    let Json(input) = payload?;
    run_blocking(&state, move |tasks| tasks.update(&id, input)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    run_blocking(&state, move |tasks| tasks.toggle_complete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<StatusCode, ApiError> {
    run_blocking(&state, move |tasks| tasks.delete(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Run a store operation off the async worker threads (it does file I/O)
async fn run_blocking<T, F>(state: &AppState, op: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce(&TaskService) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let tasks = state.tasks.clone();
    tokio::task::spawn_blocking(move || op(&tasks))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
        .map_err(ApiError::from)
}
