//! In-process [`DocumentStore`].
//!
//! Each collection is an insertion-ordered `Vec` behind a `parking_lot`
//! lock. Locks are never held across `.await`. After [`DocumentStore::close`]
//! every operation fails with [`StoreError::Unavailable`], mirroring a
//! released connection pool.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use folio_core::{ContactMessage, ResumeAnalytics, StatusCheck};
use parking_lot::RwLock;

use super::{DocumentStore, StoreError};

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    status_checks: RwLock<Vec<StatusCheck>>,
    contact_messages: RwLock<Vec<ContactMessage>>,
    resume_events: RwLock<Vec<ResumeAnalytics>>,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored contact message, in insertion order.
    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.contact_messages.read().clone()
    }

    /// Snapshot of every stored resume event, in insertion order.
    pub fn resume_events(&self) -> Vec<ResumeAnalytics> {
        self.resume_events.read().clone()
    }

    /// Whether [`DocumentStore::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::Unavailable("store closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.status_checks.write().push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        self.ensure_open()?;
        Ok(self.status_checks.read().iter().take(limit).cloned().collect())
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.contact_messages.write().push(message.clone());
        Ok(())
    }

    async fn recent_contact_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        self.ensure_open()?;
        let mut messages = self.contact_messages.read().clone();
        // Stable sort keeps insertion order among equal timestamps.
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        messages.truncate(limit);
        Ok(messages)
    }

    async fn insert_resume_event(&self, event: &ResumeAnalytics) -> Result<(), StoreError> {
        self.ensure_open()?;
        self.resume_events.write().push(event.clone());
        Ok(())
    }

    async fn count_resume_events(&self, action: &str) -> Result<u64, StoreError> {
        self.ensure_open()?;
        let count = self
            .resume_events
            .read()
            .iter()
            .filter(|e| e.action == action)
            .count();
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
