//! # Contact Form
//!
//! - `POST /api/contact` — validate and store a contact-form submission
//! - `GET /api/contact-messages` — newest 100 submissions (operator view)
//!
//! Both endpoints surface datastore failures as 500s. The listing is
//! unauthenticated; access control belongs to whatever fronts the service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use folio_core::{ContactMessage, ContactMessageCreate, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::{StoreError, CONTACT_LIST_LIMIT};
use crate::error::AppError;
use crate::extractors::{extract_json, ClientIp};
use crate::state::AppState;

/// Acknowledgment returned for every stored submission.
pub const CONTACT_ACK: &str =
    "Thank you for your message! I'll get back to you within 24 hours.";

// ── Response DTOs ───────────────────────────────────────────────────

/// Result of a contact submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: Option<RecordId>,
}

/// Stored submissions, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactMessagesResponse {
    pub success: bool,
    pub data: Vec<ContactMessage>,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/contact-messages", get(list_contact_messages))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /api/contact — Submit the contact form.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactMessageCreate,
    responses(
        (status = 200, description = "Message stored", body = ContactResponse),
        (status = 422, description = "A field constraint failed", body = crate::error::ErrorBody),
        (status = 500, description = "Message could not be stored", body = crate::error::ErrorBody),
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    client_ip: ClientIp,
    body: Result<Json<ContactMessageCreate>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    // Captured for diagnostics only; contact records carry no address.
    let client_ip = client_ip.or_unknown();
    tracing::debug!(%client_ip, "contact submission received");

    let input = extract_json(body)?;
    let message = ContactMessage::from_submission(input)?;

    match state.store().insert_contact_message(&message).await {
        Ok(()) => {}
        Err(StoreError::NotAcknowledged(collection)) => {
            return Err(AppError::internal(
                "Failed to save contact message",
                format!("insert into {collection} was not acknowledged"),
            ));
        }
        Err(e) => {
            return Err(AppError::internal(
                "An error occurred while processing your message",
                e,
            ));
        }
    }

    tracing::info!(
        email = %message.email,
        subject = %message.subject,
        "new contact message"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_ACK.to_string(),
        id: Some(message.id),
    }))
}

/// GET /api/contact-messages — Newest submissions first.
#[utoipa::path(
    get,
    path = "/api/contact-messages",
    responses(
        (status = 200, description = "Up to 100 messages, newest first", body = ContactMessagesResponse),
        (status = 500, description = "Datastore failure", body = crate::error::ErrorBody),
    ),
    tag = "contact"
)]
pub async fn list_contact_messages(
    State(state): State<AppState>,
) -> Result<Json<ContactMessagesResponse>, AppError> {
    let data = state
        .store()
        .recent_contact_messages(CONTACT_LIST_LIMIT)
        .await
        .map_err(|e| AppError::internal("Error fetching messages", e))?;
    Ok(Json(ContactMessagesResponse {
        success: true,
        data,
    }))
}
