//! # Integration Tests for folio-api
//!
//! Drives the assembled router with `oneshot` against an in-memory store,
//! and against stores that fail every call, to check each endpoint's
//! success payloads, validation rejections, and failure policy.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use folio_core::{
    ContactMessage, ContactMessageCreate, ContactStatus, EmailAddress, ResumeAnalytics, StatusCheck,
    Timestamp,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_api::db::memory::MemoryStore;
use folio_api::db::{DocumentStore, StoreError, CONTACT_MESSAGES};
use folio_api::{ApiMetrics, AppState};

/// Helper: build the test app over a fresh in-memory store.
fn test_app() -> (axum::Router, Arc<MemoryStore>) {
    let (state, store) = AppState::in_memory();
    (folio_api::app(state, ApiMetrics::new().unwrap()), store)
}

/// Helper: build the test app over an arbitrary store.
fn app_with_store(store: Arc<dyn DocumentStore>) -> axum::Router {
    folio_api::app(AppState::new(store), ApiMetrics::new().unwrap())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_contact() -> Value {
    json!({
        "name": "Jo",
        "email": "a@b.com",
        "subject": "Hello there",
        "message": "This is a test message."
    })
}

/// A datastore that cannot be reached.
#[derive(Debug)]
struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert_status_check(&self, _check: &StatusCheck) -> Result<(), StoreError> {
        Err(unreachable())
    }
    async fn list_status_checks(&self, _limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        Err(unreachable())
    }
    async fn insert_contact_message(&self, _message: &ContactMessage) -> Result<(), StoreError> {
        Err(unreachable())
    }
    async fn recent_contact_messages(
        &self,
        _limit: usize,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        Err(unreachable())
    }
    async fn insert_resume_event(&self, _event: &ResumeAnalytics) -> Result<(), StoreError> {
        Err(unreachable())
    }
    async fn count_resume_events(&self, _action: &str) -> Result<u64, StoreError> {
        Err(unreachable())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }
    async fn close(&self) {}
}

/// Accepts everything except contact inserts, which go unacknowledged.
#[derive(Debug, Default)]
struct UnacknowledgedContactStore {
    inner: MemoryStore,
}

#[async_trait]
impl DocumentStore for UnacknowledgedContactStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.inner.insert_status_check(check).await
    }
    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        self.inner.list_status_checks(limit).await
    }
    async fn insert_contact_message(&self, _message: &ContactMessage) -> Result<(), StoreError> {
        Err(StoreError::NotAcknowledged(CONTACT_MESSAGES))
    }
    async fn recent_contact_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        self.inner.recent_contact_messages(limit).await
    }
    async fn insert_resume_event(&self, event: &ResumeAnalytics) -> Result<(), StoreError> {
        self.inner.insert_resume_event(event).await
    }
    async fn count_resume_events(&self, action: &str) -> Result<u64, StoreError> {
        self.inner.count_resume_events(action).await
    }
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
    async fn close(&self) {
        self.inner.close().await
    }
}

// -- Root ---------------------------------------------------------------------

#[tokio::test]
async fn test_root_greets() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/api/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn test_root_without_trailing_slash() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Status Checks ------------------------------------------------------------

#[tokio::test]
async fn test_create_status_check_returns_record() {
    let (app, _) = test_app();
    let response = app
        .oneshot(post_json("/api/status", &json!({"client_name": "frontend"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["client_name"], "frontend");
    assert!(uuid::Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_list_status_checks_in_stored_order() {
    let (app, _) = test_app();
    for name in ["first", "second", "third"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/status", &json!({"client_name": name})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_list_status_checks_caps_at_one_thousand() {
    let (app, store) = test_app();
    for i in 0..1005 {
        store
            .insert_status_check(&StatusCheck::new(folio_core::StatusCheckCreate {
                client_name: format!("client-{i}"),
            }))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/api/status")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1000);
}

#[tokio::test]
async fn test_status_missing_client_name_is_422() {
    let (app, _) = test_app();
    let response = app
        .oneshot(post_json("/api/status", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("client_name"));
}

#[tokio::test]
async fn test_status_store_failure_is_opaque_500() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app
        .clone()
        .oneshot(post_json("/api/status", &json!({"client_name": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(!body.contains("connection refused"), "{body}");
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"detail": "Internal Server Error"})
    );

    let response = app.oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// -- Contact Form -------------------------------------------------------------

#[tokio::test]
async fn test_contact_submission_is_stored() {
    let (app, store) = test_app();
    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Thank you for your message! I'll get back to you within 24 hours."
    );
    let id = body["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let stored = store.contact_messages();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.to_string(), id);
    assert_eq!(stored[0].email.as_str(), "a@b.com");
    assert_eq!(stored[0].status.as_str(), "new");
}

#[tokio::test]
async fn test_repeated_submission_creates_distinct_records() {
    let (app, store) = test_app();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/contact", &valid_contact()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        ids.push(body_json(response).await["id"].as_str().unwrap().to_string());
    }
    assert_ne!(ids[0], ids[1]);
    assert_eq!(store.contact_messages().len(), 2);
}

#[tokio::test]
async fn test_each_contact_constraint_rejects_with_422() {
    let cases = [
        ("name", json!("J"), "name"),
        ("name", json!("x".repeat(101)), "name"),
        ("email", json!("not-an-email"), "email"),
        ("subject", json!("Hey"), "subject"),
        ("subject", json!("s".repeat(201)), "subject"),
        ("message", json!("too short"), "message"),
        ("message", json!("m".repeat(2001)), "message"),
    ];

    for (field, value, expected) in cases {
        let (app, store) = test_app();
        let mut body = valid_contact();
        body[field] = value;

        let response = app.oneshot(post_json("/api/contact", &body)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "field {field}"
        );
        let detail = body_json(response).await["detail"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(detail.contains(expected), "{field}: {detail}");
        assert!(store.contact_messages().is_empty(), "field {field}");
    }
}

#[tokio::test]
async fn test_contact_boundary_lengths_accepted() {
    let (app, store) = test_app();
    let body = json!({
        "name": "x".repeat(100),
        "email": "someone@example.org",
        "subject": "s".repeat(5),
        "message": "m".repeat(2000),
    });
    let response = app.oneshot(post_json("/api/contact", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.contact_messages().len(), 1);
}

#[tokio::test]
async fn test_contact_missing_field_is_422() {
    let (app, store) = test_app();
    let body = json!({"name": "Jo", "email": "a@b.com", "subject": "Hello there"});
    let response = app.oneshot(post_json("/api/contact", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.contact_messages().is_empty());
}

#[tokio::test]
async fn test_contact_malformed_json_is_422() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_contact_store_failure_is_500() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "An error occurred while processing your message"})
    );
}

#[tokio::test]
async fn test_contact_unacknowledged_insert_is_500() {
    let app = app_with_store(Arc::new(UnacknowledgedContactStore::default()));
    let response = app
        .oneshot(post_json("/api/contact", &valid_contact()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Failed to save contact message"})
    );
}

#[tokio::test]
async fn test_contact_messages_newest_first() {
    let (app, store) = test_app();
    for (subject, millis) in [
        ("Oldest subject", 1_700_000_000_000),
        ("Newest subject", 1_700_000_200_000),
        ("Middle subject", 1_700_000_100_000),
    ] {
        let mut message = ContactMessage::from_submission(ContactMessageCreate {
            name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            subject: subject.to_string(),
            message: "This is a test message.".to_string(),
        })
        .unwrap();
        message.created_at = Timestamp::from_millis(millis).unwrap();
        store.insert_contact_message(&message).await.unwrap();
    }

    let response = app.oneshot(get("/api/contact-messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let subjects: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, ["Newest subject", "Middle subject", "Oldest subject"]);
    assert_eq!(body["data"][0]["status"], "new");
}

#[tokio::test]
async fn test_contact_messages_list_records_from_other_writers() {
    let (app, store) = test_app();
    let mut moderated = ContactMessage::from_submission(ContactMessageCreate {
        name: "Jo".to_string(),
        email: "a@b.com".to_string(),
        subject: "Hello there".to_string(),
        message: "This is a test message.".to_string(),
    })
    .unwrap();
    moderated.email = EmailAddress::from_stored("user@localhost");
    moderated.status = ContactStatus::from_stored("spam");
    store.insert_contact_message(&moderated).await.unwrap();

    let response = app.oneshot(get("/api/contact-messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["email"], "user@localhost");
    assert_eq!(body["data"][0]["status"], "spam");
}

#[tokio::test]
async fn test_contact_messages_store_failure_is_500() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app.oneshot(get("/api/contact-messages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"detail": "Error fetching messages"})
    );
}

// -- Resume Analytics ---------------------------------------------------------

#[tokio::test]
async fn test_download_increments_stats_by_one() {
    let (app, _) = test_app();

    let before = body_json(app.clone().oneshot(get("/api/resume-stats")).await.unwrap()).await;
    assert_eq!(before, json!({"success": true, "data": {"downloads": 0, "views": 0}}));

    let response = app
        .clone()
        .oneshot(post_json("/api/resume-analytics", &json!({"action": "download"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": true, "message": "Action tracked"})
    );

    let after = body_json(app.oneshot(get("/api/resume-stats")).await.unwrap()).await;
    assert_eq!(after["data"]["downloads"], 1);
    assert_eq!(after["data"]["views"], 0);
}

#[tokio::test]
async fn test_unknown_action_is_stored_but_not_counted() {
    let (app, store) = test_app();
    let response = app
        .clone()
        .oneshot(post_json("/api/resume-analytics", &json!({"action": "share"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.resume_events().len(), 1);
    assert_eq!(store.resume_events()[0].action, "share");

    let stats = body_json(app.oneshot(get("/api/resume-stats")).await.unwrap()).await;
    assert_eq!(stats["data"], json!({"downloads": 0, "views": 0}));
}

#[tokio::test]
async fn test_tracking_records_peer_address() {
    let (app, store) = test_app();
    let mut request = post_json("/api/resume-analytics", &json!({"action": "view"}));
    let peer: SocketAddr = "203.0.113.7:51000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        store.resume_events()[0].ip_address.as_deref(),
        Some("203.0.113.7")
    );
}

#[tokio::test]
async fn test_tracking_without_peer_address_records_unknown() {
    let (app, store) = test_app();
    let response = app
        .oneshot(post_json("/api/resume-analytics", &json!({"action": "view"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.resume_events()[0].ip_address.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn test_tracking_with_unreachable_store_soft_fails() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app
        .oneshot(post_json("/api/resume-analytics", &json!({"action": "view"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "message": "Tracking failed"})
    );
}

#[tokio::test]
async fn test_stats_with_unreachable_store_soft_fails() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app.oneshot(get("/api/resume-stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"success": false, "data": {"downloads": 0, "views": 0}})
    );
}

#[tokio::test]
async fn test_tracking_missing_action_is_422() {
    let (app, store) = test_app();
    let response = app
        .oneshot(post_json("/api/resume-analytics", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.resume_events().is_empty());
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_readiness_fails_when_datastore_unreachable() {
    let app = app_with_store(Arc::new(UnreachableStore));
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_string(response).await, "datastore unreachable");
}

#[tokio::test]
async fn test_readiness_fails_after_close() {
    let (app, store) = test_app();
    store.close().await;
    let response = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- Metrics and OpenAPI ------------------------------------------------------

#[tokio::test]
async fn test_metrics_record_matched_route() {
    let (app, _) = test_app();
    app.clone().oneshot(get("/api/resume-stats")).await.unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let body = body_string(response).await;
    assert!(body.contains("folio_http_requests_total"));
    assert!(body.contains("path=\"/api/resume-stats\""));
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let (app, _) = test_app();
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/api/contact"]["post"].is_object());
    assert!(body["paths"]["/api/resume-stats"]["get"].is_object());
}

// -- Cross-Origin -------------------------------------------------------------

#[tokio::test]
async fn test_cors_mirrors_origin_with_credentials() {
    let (app, _) = test_app();
    let request = Request::builder()
        .uri("/api/resume-stats")
        .header(header::ORIGIN, "https://portfolio.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://portfolio.example"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_method() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(header::ORIGIN, "https://portfolio.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://portfolio.example"
    );
    assert!(headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .contains("POST"));
}
