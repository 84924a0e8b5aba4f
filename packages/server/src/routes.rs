//! HTTP route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use cafs_numeric::{assemble, Operation, OperationRequest, OperationResponse, ResourceReader};
use cafs_resource::{is_store_path, RESOURCE_SCHEMA_VERSION};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test-cafs", get(test_cafs));

    for operation in Operation::ALL {
        router = router.route(
            &format!("/{}", operation.name()),
            post(
                move |State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>| {
                    run_operation(state, operation, body)
                },
            ),
        );
    }

    router.with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Status {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(
        rename = "schemaVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_version: Option<u32>,
}

/// GET / - liveness, never touches the store.
async fn root() -> Json<Status> {
    Json(Status {
        status: "OK".to_string(),
        message: "Numerical service is up".to_string(),
        timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        schema_version: None,
    })
}

async fn health() -> Json<Status> {
    Json(Status {
        status: "OK".to_string(),
        message: "Numerical server is running".to_string(),
        timestamp: None,
        schema_version: Some(RESOURCE_SCHEMA_VERSION),
    })
}

#[derive(Debug, Deserialize)]
struct TestCafsQuery {
    id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestCafsResponse {
    pub id: String,
    pub value: i64,
}

/// GET /test-cafs?id=<path> - read one resource through the reader.
async fn test_cafs(
    State(state): State<AppState>,
    Query(query): Query<TestCafsQuery>,
) -> Result<Json<TestCafsResponse>, ApiError> {
    let id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing required query parameter 'id'".to_string()))?;

    if !is_store_path(&id) {
        return Err(ApiError::BadRequest(format!("'{}' is not a store path", id)));
    }

    let value = ResourceReader::new(state.store()).read_path(&id).await?;
    Ok(Json(TestCafsResponse { id, value }))
}

/// POST /{operation} - validate, execute, assemble.
async fn run_operation(
    state: AppState,
    operation: Operation,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OperationResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let request = OperationRequest::from_body(operation, &body, &state.roles)?;
    let execution = state.executor.execute(&request).await?;

    info!(
        %operation,
        branch = ?execution.branch,
        outputs = execution.committed.len(),
        "operation committed"
    );

    Ok(Json(assemble(&execution, state.shape)))
}
