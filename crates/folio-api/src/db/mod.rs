//! # Document Persistence Layer
//!
//! The persistence handle every handler borrows. [`DocumentStore`] is the
//! seam; [`mongo::MongoStore`] talks to MongoDB and [`memory::MemoryStore`]
//! keeps collections in process for tests and local runs.
//!
//! ## Collections
//!
//! | Collection          | Record                                 |
//! |---------------------|----------------------------------------|
//! | `status_checks`     | [`folio_core::StatusCheck`]            |
//! | `contact_messages`  | [`folio_core::ContactMessage`]         |
//! | `resume_analytics`  | [`folio_core::ResumeAnalytics`]        |
//!
//! Collections are schema-less and insert-only from this service's point
//! of view. There are no migrations.
//!
//! ## Lifecycle
//!
//! [`connect`] runs once at startup and fails if the datastore is
//! unreachable. [`DocumentStore::close`] runs once after the HTTP server
//! has drained. Handlers never close the store.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::{ContactMessage, ResumeAnalytics, StatusCheck};
use thiserror::Error;

use crate::config::{AppConfig, StoreBackend};

/// Collection holding [`StatusCheck`] documents.
pub const STATUS_CHECKS: &str = "status_checks";
/// Collection holding [`ContactMessage`] documents.
pub const CONTACT_MESSAGES: &str = "contact_messages";
/// Collection holding [`ResumeAnalytics`] documents.
pub const RESUME_ANALYTICS: &str = "resume_analytics";

/// Upper bound on `GET /api/status`.
pub const STATUS_LIST_LIMIT: usize = 1000;
/// Upper bound on `GET /api/contact-messages`.
pub const CONTACT_LIST_LIMIT: usize = 100;

/// Failures reported by a [`DocumentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database driver returned an error (network, auth, server).
    #[error("datastore driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// A stored document could not be mapped onto its record type.
    #[error("malformed document in {collection}: {reason}")]
    Encoding {
        /// Collection the document came from.
        collection: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The store cannot serve requests (closed, or unreachable).
    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    /// The write returned without confirming an inserted document.
    #[error("insert into {0} was not acknowledged")]
    NotAcknowledged(&'static str),
}

/// Process-wide persistence handle.
///
/// One method per query the handlers issue. Implementations must be safe
/// for concurrent use; the handle is shared as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Insert one status check.
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError>;

    /// Up to `limit` status checks in stored order.
    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError>;

    /// Insert one contact message.
    ///
    /// Returns [`StoreError::NotAcknowledged`] when the datastore accepted
    /// the request but did not confirm the insert.
    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError>;

    /// Up to `limit` contact messages, newest `created_at` first.
    async fn recent_contact_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<ContactMessage>, StoreError>;

    /// Append one resume interaction event.
    async fn insert_resume_event(&self, event: &ResumeAnalytics) -> Result<(), StoreError>;

    /// Number of resume events whose `action` equals `action`.
    async fn count_resume_events(&self, action: &str) -> Result<u64, StoreError>;

    /// Round-trip to the datastore. Used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the connection pool. Called once, at shutdown.
    async fn close(&self);
}

/// Shared handle type held in application state.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Open the store selected by `config`.
///
/// # Errors
///
/// Any connection failure. Callers treat this as fatal.
pub async fn connect(config: &AppConfig) -> Result<SharedStore, StoreError> {
    match &config.backend {
        StoreBackend::Mongo { url, db_name } => {
            let store = mongo::MongoStore::connect(url, db_name, config.connect_timeout).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory datastore; records will not survive restarts");
            Ok(Arc::new(memory::MemoryStore::new()))
        }
    }
}
