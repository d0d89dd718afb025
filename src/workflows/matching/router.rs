use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, MatchRequest, MatchResponse, ReviewStatus};
use super::engine::MatchRunError;
use super::service::{MatchService, MatchServiceError};
use super::source::CandidateSource;
use super::store::StoreError;

/// Router builder exposing the matching workflow over HTTP.
pub fn matching_router<S>(service: Arc<MatchService<S>>) -> Router
where
    S: CandidateSource + 'static,
{
    Router::new()
        .route("/api/v1/matching/runs", post(run_handler::<S>))
        .route("/api/v1/matching/runs/latest", get(latest_handler::<S>))
        .route("/api/v1/matching/runs/cancel", post(cancel_handler::<S>))
        .route("/api/v1/matching/status", get(status_handler::<S>))
        .route(
            "/api/v1/matching/results/:candidate_id/review",
            post(review_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn run_handler<S>(
    State(service): State<Arc<MatchService<S>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    S: CandidateSource + 'static,
{
    let job_id = request.job_criteria.job_id();
    match service.run(&request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(MatchServiceError::Store(StoreError::RunInFlight)) => {
            let payload = json!({ "error": StoreError::RunInFlight.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::Run(MatchRunError::NoCandidates)) => {
            // The dashboard contract expects a failure envelope here, not a
            // bare error object.
            let envelope = MatchResponse::failure(job_id);
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(envelope)).into_response()
        }
        Err(MatchServiceError::Run(MatchRunError::Weights(error))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::Run(error @ MatchRunError::Cancelled { .. })) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::Source(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<S>(State(service): State<Arc<MatchService<S>>>) -> Response
where
    S: CandidateSource + 'static,
{
    (StatusCode::OK, axum::Json(service.status())).into_response()
}

pub(crate) async fn latest_handler<S>(State(service): State<Arc<MatchService<S>>>) -> Response
where
    S: CandidateSource + 'static,
{
    match service.latest() {
        Some(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        None => {
            let payload = json!({ "error": "no completed match run" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn cancel_handler<S>(State(service): State<Arc<MatchService<S>>>) -> Response
where
    S: CandidateSource + 'static,
{
    if service.cancel() {
        (StatusCode::OK, axum::Json(json!({ "cancelled": true }))).into_response()
    } else {
        let payload = json!({ "error": "no matching run in flight" });
        (StatusCode::CONFLICT, axum::Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewUpdateRequest {
    status: ReviewStatus,
}

pub(crate) async fn review_handler<S>(
    State(service): State<Arc<MatchService<S>>>,
    Path(candidate_id): Path<String>,
    axum::Json(update): axum::Json<ReviewUpdateRequest>,
) -> Response
where
    S: CandidateSource + 'static,
{
    let id = CandidateId(candidate_id);
    match service.review(&id, update.status) {
        Ok(()) => {
            let payload = json!({
                "candidateId": id.0,
                "status": update.status.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::Store(StoreError::NoResponse)) => {
            let payload = json!({ "error": StoreError::NoResponse.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(MatchServiceError::Store(StoreError::UnknownResult(id))) => {
            let payload = json!({ "error": format!("candidate {id} is not present in the latest results") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
