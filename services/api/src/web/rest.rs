//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use mood_analysis_core::{
    analyze, analyze_snapshot, AnalysisReport, PortError, Priority, TaskRecord, TaskWarning,
    WarningKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        analyze_user_tasks_handler,
        analyze_snapshot_handler,
        health_handler,
    ),
    components(
        schemas(AnalysisReport, AnalyzeRequest, HealthResponse, Priority, TaskRecord, TaskWarning, WarningKind)
    ),
    tags(
        (name = "Mood Analysis API", description = "Aggregates logged mood tasks into time-per-mood reports.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Request and Response Structs
//=========================================================================================

/// A caller-supplied snapshot to analyze.
///
/// `tasks` must be present; an empty list is a valid, empty snapshot.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub tasks: Option<Vec<TaskRecord>>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Analyze every task a user has logged.
///
/// Requires an `Authorization: Bearer <token>` header.
#[utoipa::path(
    get,
    path = "/tasks/analyze/{user_id}",
    responses(
        (status = 200, description = "Analysis report for the user's tasks", body = AnalysisReport),
        (status = 400, description = "The user id is not an integer"),
        (status = 401, description = "Missing or malformed bearer header"),
        (status = 500, description = "The task store failed"),
        (status = 503, description = "The task store is unavailable"),
        (status = 504, description = "The analysis did not finish in time")
    ),
    params(
        ("user_id" = i64, Path, description = "The id of the user whose tasks are analyzed.")
    )
)]
pub async fn analyze_user_tasks_handler(
    State(app_state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<AnalysisReport>, (StatusCode, String)> {
    let store = app_state.store.clone();
    let outcome = tokio::time::timeout(app_state.config.analysis_timeout, async move {
        let tasks = store.tasks_for_user(user_id).await?;
        Ok::<_, PortError>(analyze(&tasks))
    })
    .await;

    match outcome {
        Ok(Ok(report)) => {
            info!(
                user_id,
                moods = report.mood_count(),
                warnings = report.warnings.len(),
                "Analyzed user tasks"
            );
            Ok(Json(report))
        }
        Ok(Err(e)) => {
            error!("Failed to load tasks for user {}: {:?}", user_id, e);
            let status = match e {
                PortError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Err((status, "Failed to load tasks".to_string()))
        }
        Err(_) => {
            error!(
                "Analysis for user {} exceeded {:?}",
                user_id, app_state.config.analysis_timeout
            );
            Err((
                StatusCode::GATEWAY_TIMEOUT,
                "Analysis timed out".to_string(),
            ))
        }
    }
}

/// Analyze a snapshot of tasks supplied in the request body.
///
/// Requires an `Authorization: Bearer <token>` header.
#[utoipa::path(
    post,
    path = "/tasks/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis report for the supplied tasks", body = AnalysisReport),
        (status = 401, description = "Missing or malformed bearer header"),
        (status = 422, description = "The request carried no task snapshot")
    )
)]
pub async fn analyze_snapshot_handler(
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, (StatusCode, String)> {
    analyze_snapshot(req.tasks).map(Json).map_err(|e| {
        error!("Rejected analysis request: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The service is running", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
