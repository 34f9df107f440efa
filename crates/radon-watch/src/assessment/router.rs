use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::repository::{AssessmentId, PredictionStore, StoreError};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::risk::HomeCharacteristics;

/// Router builder exposing HTTP endpoints for scoring and the dashboard hand-off.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: PredictionStore + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(submit_handler::<S>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(dashboard_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(home): axum::Json<HomeCharacteristics>,
) -> Response
where
    S: PredictionStore + 'static,
{
    match service.submit(home) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(AssessmentServiceError::Scoring(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field().field_name(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AssessmentServiceError::Store(StoreError::Conflict)) => {
            let payload = json!({
                "error": "assessment already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: PredictionStore + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.dashboard())).into_response(),
        Err(AssessmentServiceError::Store(StoreError::NotFound)) => {
            let payload = json!({
                "assessmentId": id.0,
                "error": "assessment not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
