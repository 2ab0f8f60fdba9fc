//! # Resume Analytics
//!
//! - `POST /api/resume-analytics` — record a download or view
//! - `GET /api/resume-stats` — download and view totals
//!
//! Datastore failures here never become HTTP errors. Both endpoints
//! answer 200 with `success: false` so instrumentation cannot break the
//! page that calls them.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use folio_core::{ResumeAction, ResumeAnalytics};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_json, ClientIp};
use crate::state::AppState;

/// Outcome of a tracking call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackResponse {
    pub success: bool,
    pub message: String,
}

/// Event totals by action.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResumeStats {
    pub downloads: u64,
    pub views: u64,
}

/// Totals, or zeros with `success: false` when they could not be read.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResumeStatsResponse {
    pub success: bool,
    pub data: ResumeStats,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/resume-analytics", post(track_resume_action))
        .route("/api/resume-stats", get(resume_stats))
}

/// POST /api/resume-analytics — Record a resume interaction.
///
/// `action` is stored verbatim; it is not checked against the known set.
#[utoipa::path(
    post,
    path = "/api/resume-analytics",
    request_body = ResumeAction,
    responses(
        (status = 200, description = "Tracked, or `success: false` if the write failed", body = TrackResponse),
        (status = 422, description = "Malformed body", body = crate::error::ErrorBody),
    ),
    tag = "resume"
)]
pub async fn track_resume_action(
    State(state): State<AppState>,
    client_ip: ClientIp,
    body: Result<Json<ResumeAction>, JsonRejection>,
) -> Result<Json<TrackResponse>, AppError> {
    let input = extract_json(body)?;
    let event = ResumeAnalytics::record(input, Some(client_ip.or_unknown()));

    let response = match state.store().insert_resume_event(&event).await {
        Ok(()) => TrackResponse {
            success: true,
            message: "Action tracked".to_string(),
        },
        Err(e) => {
            tracing::error!(error = %e, action = %event.action, "error tracking resume action");
            TrackResponse {
                success: false,
                message: "Tracking failed".to_string(),
            }
        }
    };
    Ok(Json(response))
}

/// GET /api/resume-stats — Download and view totals.
#[utoipa::path(
    get,
    path = "/api/resume-stats",
    responses(
        (status = 200, description = "Totals, or zeros with `success: false` if they could not be read", body = ResumeStatsResponse),
    ),
    tag = "resume"
)]
pub async fn resume_stats(State(state): State<AppState>) -> Json<ResumeStatsResponse> {
    let store = state.store();
    let counts = futures::try_join!(
        store.count_resume_events(ResumeAnalytics::DOWNLOAD),
        store.count_resume_events(ResumeAnalytics::VIEW),
    );

    Json(match counts {
        Ok((downloads, views)) => ResumeStatsResponse {
            success: true,
            data: ResumeStats { downloads, views },
        },
        Err(e) => {
            tracing::error!(error = %e, "error fetching resume stats");
            ResumeStatsResponse {
                success: false,
                data: ResumeStats::default(),
            }
        }
    })
}
