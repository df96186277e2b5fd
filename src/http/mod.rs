//! HTTP Module
//!
//! JSON API over the task service.
//!
//! ## Architecture
//! - axum router, one handler per route
//! - Store calls run on the blocking pool
//! - Errors mapped to status codes in one place (`ApiError`)

mod error;
mod routes;

use axum::routing::{get, patch};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::tasks::TaskService;

pub use error::ApiError;
pub use routes::ListQuery;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
}

/// Build the router for the task API
pub fn router(tasks: TaskService) -> Router {
    Router::new()
        .route("/tasks", get(routes::list_tasks).post(routes::create_task))
        .route(
            "/tasks/:id",
            get(routes::get_task)
                .put(routes::update_task)
                .delete(routes::delete_task),
        )
        .route("/tasks/:id/complete", patch(routes::complete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { tasks })
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(addr: &str, tasks: TaskService, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(tasks))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
