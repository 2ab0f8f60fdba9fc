//! # folio-api — Axum HTTP Service for the Portfolio Backend
//!
//! Accepts contact-form submissions, counts resume downloads and views,
//! and keeps a log of status checks. Every record goes to the document
//! store injected through [`AppState`]; nothing is cached in memory.
//!
//! ## API Surface
//!
//! | Path                        | Module                  | Failure policy      |
//! |-----------------------------|-------------------------|---------------------|
//! | `/api/`                     | [`routes::root`]        | n/a                 |
//! | `/api/status`               | [`routes::status`]      | 500 on store error  |
//! | `/api/contact`              | [`routes::contact`]     | 500 on store error  |
//! | `/api/contact-messages`     | [`routes::contact`]     | 500 on store error  |
//! | `/api/resume-analytics`     | [`routes::resume`]      | 200, `success:false`|
//! | `/api/resume-stats`         | [`routes::resume`]      | 200, `success:false`|
//! | `/health/*`, `/metrics`     | this module             | 503 when unready    |
//! | `/openapi.json`             | [`openapi`]             | n/a                 |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! Cors → Trace → Metrics → BodyLimit → Handler
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

pub use crate::error::AppError;
pub use crate::middleware::metrics::ApiMetrics;
pub use crate::state::AppState;

/// Largest request body accepted, in bytes.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Cross-origin requests are allowed from anywhere, with credentials. The
/// CORS layer mirrors the request's origin, method, and headers, since a
/// literal wildcard cannot be combined with credentials.
pub fn app(state: AppState, metrics: ApiMetrics) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(Extension(metrics))
        .layer(middleware::tracing_layer::layer())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 once the datastore answers a ping.
async fn readiness(State(state): State<AppState>) -> Response {
    match state.store().ping().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "datastore unreachable").into_response()
        }
    }
}

/// GET /metrics — Prometheus text exposition.
async fn prometheus_metrics(Extension(metrics): Extension<ApiMetrics>) -> Response {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
