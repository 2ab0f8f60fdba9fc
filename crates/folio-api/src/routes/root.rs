//! # API Root
//!
//! `GET /api/` — greeting used by the frontend as a connectivity check.

use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Greeting body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(root))
        .route("/api/", get(root))
}

/// GET /api/ — Greeting.
#[utoipa::path(
    get,
    path = "/api/",
    responses((status = 200, description = "Greeting", body = RootResponse)),
    tag = "root"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World".to_string(),
    })
}
