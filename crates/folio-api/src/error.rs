//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Validation failures surface as 422 with the violated constraint in the
//! body. Server failures surface as 500 with a fixed, endpoint-chosen
//! message; the underlying cause is logged and never returned to clients.
//!
//! Only endpoints that must report failure use [`AppError`]. The analytics
//! endpoints answer failures with a `success: false` payload instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error response body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description.
    pub detail: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body is malformed or breaks a field constraint (422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A server-side failure (500). `public` is returned to the client;
    /// `detail` is only logged.
    #[error("{public}: {detail}")]
    Internal {
        /// Message the client sees.
        public: &'static str,
        /// Cause, for the log.
        detail: String,
    },
}

impl AppError {
    /// Build a 500 with a client-facing message and a logged cause.
    pub fn internal(public: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            public,
            detail: detail.to_string(),
        }
    }

    /// Return the HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<folio_core::ValidationError> for AppError {
    fn from(err: folio_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            Self::Internal { public, detail } => {
                tracing::error!(error = %detail, "{public}");
                (*public).to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
