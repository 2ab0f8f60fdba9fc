//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented `/api` handlers into one OpenAPI
//! document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the `/api` surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Backend API",
        description = "Contact-form inbox, resume analytics counters, and status-check log.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::root::root,
        crate::routes::status::create_status_check,
        crate::routes::status::list_status_checks,
        crate::routes::contact::submit_contact,
        crate::routes::contact::list_contact_messages,
        crate::routes::resume::track_resume_action,
        crate::routes::resume::resume_stats,
    ),
    components(schemas(
        folio_core::StatusCheck,
        folio_core::StatusCheckCreate,
        folio_core::ContactMessage,
        folio_core::ContactMessageCreate,
        folio_core::ContactStatus,
        folio_core::ResumeAction,
        folio_core::RecordId,
        folio_core::EmailAddress,
        folio_core::Timestamp,
        crate::routes::root::RootResponse,
        crate::routes::contact::ContactResponse,
        crate::routes::contact::ContactMessagesResponse,
        crate::routes::resume::TrackResponse,
        crate::routes::resume::ResumeStats,
        crate::routes::resume::ResumeStatsResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "root", description = "Connectivity check"),
        (name = "status", description = "Status-check log"),
        (name = "contact", description = "Contact-form inbox"),
        (name = "resume", description = "Resume analytics"),
    )
)]
pub struct ApiDoc;

/// Router serving the document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
