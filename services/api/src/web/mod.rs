pub mod middleware;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use middleware::require_bearer;
pub use rest::{analyze_snapshot_handler, analyze_user_tasks_handler, health_handler};

use state::AppState;

/// Builds the API router. Everything except the health check requires a bearer header.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/health", get(health_handler));

    let protected_routes = Router::new()
        .route("/tasks/analyze", post(analyze_snapshot_handler))
        .route("/tasks/analyze/{user_id}", get(analyze_user_tasks_handler))
        .layer(axum_middleware::from_fn(require_bearer));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}
