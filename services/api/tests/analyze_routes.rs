//! End-to-end tests for the analysis routes, run against an in-memory task store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use api_lib::config::Config;
use api_lib::web::{build_router, state::AppState};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use mood_analysis_core::{PortError, PortResult, Priority, TaskRecord, TaskStore};
use serde_json::{json, Value};
use tower::ServiceExt;

//=========================================================================================
// Test Doubles
//=========================================================================================

#[derive(Default)]
struct MemoryStore {
    tasks: HashMap<i64, Vec<TaskRecord>>,
    delay: Option<Duration>,
    fail_with: Option<fn(String) -> PortError>,
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn tasks_for_user(&self, user_id: i64) -> PortResult<Vec<TaskRecord>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(fail) = self.fail_with {
            return Err(fail("connection refused".to_string()));
        }
        Ok(self.tasks.get(&user_id).cloned().unwrap_or_default())
    }
}

fn task(id: i64, mood: &str, start: &str, finish: &str) -> TaskRecord {
    TaskRecord {
        id: Some(id),
        user_id: 11,
        mood: mood.to_string(),
        title: "Work Presentation".to_string(),
        description: "empty".to_string(),
        priority: Priority::High,
        start_time: start.to_string(),
        finish_time: finish.to_string(),
    }
}

fn app(store: MemoryStore, timeout: Duration) -> Router {
    let config = Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        log_level: tracing::Level::INFO,
        cors_origin: "http://localhost:3000".to_string(),
        analysis_timeout: timeout,
    };
    build_router(Arc::new(AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    }))
}

fn seeded_store() -> MemoryStore {
    let mut tasks = HashMap::new();
    tasks.insert(
        11,
        vec![
            task(1, "Energetic", "15:22", "15:22"),
            task(2, "Energetic", "15:25", "15:25"),
            task(3, "Relaxed", "16:10", "16:20"),
            task(4, "Stressed", "10:30", "10:00"),
        ],
    );
    MemoryStore {
        tasks,
        ..MemoryStore::default()
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer test-token")
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer test-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

//=========================================================================================
// GET /tasks/analyze/{user_id}
//=========================================================================================

#[tokio::test]
async fn analyzes_stored_tasks() {
    let (status, body) = send(
        app(seeded_store(), Duration::from_secs(5)),
        get("/tasks/analyze/11"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        report["totalMinutesData"],
        json!({ "Energetic": 0, "Relaxed": 10, "Stressed": 0 })
    );
    assert_eq!(
        report["timeRangesData"],
        json!({
            "Energetic": [["15:22", "15:22"], ["15:25", "15:25"]],
            "Relaxed": [["16:10", "16:20"]],
            "Stressed": []
        })
    );
    assert_eq!(report["warnings"][0]["taskId"], 4);
    assert_eq!(report["warnings"][0]["kind"], "invalidInterval");
}

#[tokio::test]
async fn unknown_user_gets_empty_report() {
    let (status, body) = send(
        app(seeded_store(), Duration::from_secs(5)),
        get("/tasks/analyze/99"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["totalMinutesData"], json!({}));
    assert_eq!(report["timeRangesData"], json!({}));
}

#[tokio::test]
async fn missing_bearer_header_is_unauthorized() {
    let request = Request::builder()
        .uri("/tasks/analyze/11")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(seeded_store(), Duration::from_secs(5)), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_numeric_user_id_is_bad_request() {
    let (status, _) = send(
        app(seeded_store(), Duration::from_secs(5)),
        get("/tasks/analyze/eleven"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let store = MemoryStore {
        fail_with: Some(PortError::Unavailable),
        ..MemoryStore::default()
    };
    let (status, _) = send(app(store, Duration::from_secs(5)), get("/tasks/analyze/11")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn failing_store_maps_to_500() {
    let store = MemoryStore {
        fail_with: Some(PortError::Unexpected),
        ..MemoryStore::default()
    };
    let (status, body) = send(app(store, Duration::from_secs(5)), get("/tasks/analyze/11")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "Failed to load tasks");
}

#[tokio::test]
async fn slow_store_times_out() {
    let store = MemoryStore {
        delay: Some(Duration::from_secs(2)),
        ..seeded_store()
    };
    let (status, _) = send(app(store, Duration::from_millis(50)), get("/tasks/analyze/11")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

//=========================================================================================
// POST /tasks/analyze and /health
//=========================================================================================

#[tokio::test]
async fn analyzes_supplied_snapshot() {
    let body = json!({
        "tasks": [
            { "userId": 11, "mood": "Creative", "title": "Home Repairs",
              "startTime": "16:48", "finishTime": "17:48", "priority": "Low" },
            { "userId": 11, "mood": "Creative", "title": "Home Repairs",
              "startTime": "16:48", "finishTime": "17:48", "priority": "Low" }
        ]
    });
    let (status, bytes) = send(
        app(MemoryStore::default(), Duration::from_secs(5)),
        post_json("/tasks/analyze", body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["totalMinutesData"], json!({ "Creative": 120 }));
    assert_eq!(report["timeRangesData"], json!({ "Creative": [["16:48", "17:48"]] }));
}

#[tokio::test]
async fn bad_records_in_snapshot_become_warnings() {
    let body = json!({
        "tasks": [
            { "id": 1, "userId": 11, "mood": "Relaxed", "title": "Meal Planning and Cooking",
              "startTime": "16:10", "finishTime": "16:20", "priority": "High" },
            { "id": 2, "userId": 11, "mood": "Tired", "title": "Budgeting",
              "startTime": "08:00", "finishTime": "08:45", "priority": "Urgent" },
            { "id": 3, "userId": 11, "mood": "Tired", "title": "Budgeting",
              "startTime": null, "finishTime": "09:00", "priority": "high" }
        ]
    });
    let (status, bytes) = send(
        app(MemoryStore::default(), Duration::from_secs(5)),
        post_json("/tasks/analyze", body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        report["totalMinutesData"],
        json!({ "Relaxed": 10, "Tired": 45 })
    );
    assert_eq!(
        report["timeRangesData"],
        json!({ "Relaxed": [["16:10", "16:20"]], "Tired": [["08:00", "08:45"]] })
    );
    assert_eq!(report["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(report["warnings"][0]["taskId"], 3);
    assert_eq!(report["warnings"][0]["kind"], "malformedTime");
}

#[tokio::test]
async fn empty_snapshot_is_not_an_error() {
    let (status, bytes) = send(
        app(MemoryStore::default(), Duration::from_secs(5)),
        post_json("/tasks/analyze", json!({ "tasks": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["totalMinutesData"], json!({}));
}

#[tokio::test]
async fn absent_snapshot_is_unprocessable() {
    for body in [json!({}), json!({ "tasks": null })] {
        let (status, bytes) = send(
            app(MemoryStore::default(), Duration::from_secs(5)),
            post_json("/tasks/analyze", body),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "No task snapshot was supplied for analysis"
        );
    }
}

#[tokio::test]
async fn health_needs_no_token() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = send(app(MemoryStore::default(), Duration::from_secs(5)), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&bytes).unwrap(),
        json!({ "status": "ok" })
    );
}
