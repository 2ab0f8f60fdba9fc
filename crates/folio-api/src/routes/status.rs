//! # Status Checks
//!
//! - `POST /api/status` — record a client check-in
//! - `GET /api/status` — list check-ins in stored order (at most 1000)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use folio_core::{StatusCheck, StatusCheckCreate};

use crate::db::STATUS_LIST_LIMIT;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

const INTERNAL_MESSAGE: &str = "Internal Server Error";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/status", get(list_status_checks).post(create_status_check))
}

/// POST /api/status — Record a check-in.
#[utoipa::path(
    post,
    path = "/api/status",
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Check-in recorded", body = StatusCheck),
        (status = 422, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 500, description = "Datastore failure", body = crate::error::ErrorBody),
    ),
    tag = "status"
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    body: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, AppError> {
    let input = extract_json(body)?;
    let check = StatusCheck::new(input);
    state
        .store()
        .insert_status_check(&check)
        .await
        .map_err(|e| AppError::internal(INTERNAL_MESSAGE, e))?;
    Ok(Json(check))
}

/// GET /api/status — List check-ins.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Check-ins in stored order", body = Vec<StatusCheck>),
        (status = 500, description = "Datastore failure", body = crate::error::ErrorBody),
    ),
    tag = "status"
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    let checks = state
        .store()
        .list_status_checks(STATUS_LIST_LIMIT)
        .await
        .map_err(|e| AppError::internal(INTERNAL_MESSAGE, e))?;
    Ok(Json(checks))
}
