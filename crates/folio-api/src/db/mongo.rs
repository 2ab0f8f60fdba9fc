//! MongoDB-backed [`DocumentStore`].
//!
//! Documents keep the field names of the API records. Identifiers are
//! stored as UUID strings and times as BSON dates (millisecond precision),
//! so `created_at` sorts natively. MongoDB adds its own `_id`; it is
//! ignored on read.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{
    ContactMessage, ContactStatus, EmailAddress, RecordId, ResumeAnalytics, StatusCheck, Timestamp,
};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::{DocumentStore, StoreError, CONTACT_MESSAGES, RESUME_ANALYTICS, STATUS_CHECKS};

const APP_NAME: &str = "folio-api";

/// MongoDB connection pool bound to one database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to `url`, select `db_name`, and verify the server answers.
    ///
    /// The driver connects lazily, so a `ping` is issued here to make an
    /// unreachable server fail startup instead of the first request.
    pub async fn connect(url: &str, db_name: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = db_name, "connected to MongoDB");
        Ok(Self { client, db })
    }

    fn status_checks(&self) -> Collection<StatusCheckDoc> {
        self.db.collection(STATUS_CHECKS)
    }

    fn contact_messages(&self) -> Collection<ContactMessageDoc> {
        self.db.collection(CONTACT_MESSAGES)
    }

    fn resume_events(&self) -> Collection<ResumeEventDoc> {
        self.db.collection(RESUME_ANALYTICS)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.status_checks()
            .insert_one(StatusCheckDoc::from(check))
            .await?;
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let docs: Vec<StatusCheckDoc> = self
            .status_checks()
            .find(doc! {})
            .limit(as_limit(limit))
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(StatusCheck::try_from).collect()
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let result = self
            .contact_messages()
            .insert_one(ContactMessageDoc::from(message))
            .await?;
        if matches!(result.inserted_id, Bson::Null | Bson::Undefined) {
            return Err(StoreError::NotAcknowledged(CONTACT_MESSAGES));
        }
        Ok(())
    }

    async fn recent_contact_messages(
        &self,
        limit: usize,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        let docs: Vec<ContactMessageDoc> = self
            .contact_messages()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(as_limit(limit))
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn insert_resume_event(&self, event: &ResumeAnalytics) -> Result<(), StoreError> {
        self.resume_events()
            .insert_one(ResumeEventDoc::from(event))
            .await?;
        Ok(())
    }

    async fn count_resume_events(&self, action: &str) -> Result<u64, StoreError> {
        Ok(self
            .resume_events()
            .count_documents(doc! { "action": action })
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection pool closed");
    }
}

fn as_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

// -- Stored document shapes ---------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct StatusCheckDoc {
    id: String,
    client_name: String,
    timestamp: bson::DateTime,
}

impl From<&StatusCheck> for StatusCheckDoc {
    fn from(check: &StatusCheck) -> Self {
        Self {
            id: check.id.to_string(),
            client_name: check.client_name.clone(),
            timestamp: to_bson_time(&check.timestamp),
        }
    }
}

impl TryFrom<StatusCheckDoc> for StatusCheck {
    type Error = StoreError;

    fn try_from(doc: StatusCheckDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(STATUS_CHECKS, &doc.id)?,
            client_name: doc.client_name,
            timestamp: from_bson_time(STATUS_CHECKS, doc.timestamp)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ContactMessageDoc {
    id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    created_at: bson::DateTime,
    #[serde(default)]
    status: ContactStatus,
}

impl From<&ContactMessage> for ContactMessageDoc {
    fn from(msg: &ContactMessage) -> Self {
        Self {
            id: msg.id.to_string(),
            name: msg.name.clone(),
            email: msg.email.as_str().to_string(),
            subject: msg.subject.clone(),
            message: msg.message.clone(),
            created_at: to_bson_time(&msg.created_at),
            status: msg.status.clone(),
        }
    }
}

impl TryFrom<ContactMessageDoc> for ContactMessage {
    type Error = StoreError;

    fn try_from(doc: ContactMessageDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(CONTACT_MESSAGES, &doc.id)?,
            name: doc.name,
            email: EmailAddress::from_stored(doc.email),
            subject: doc.subject,
            message: doc.message,
            created_at: from_bson_time(CONTACT_MESSAGES, doc.created_at)?,
            status: doc.status,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ResumeEventDoc {
    id: String,
    action: String,
    timestamp: bson::DateTime,
    ip_address: Option<String>,
}

impl From<&ResumeAnalytics> for ResumeEventDoc {
    fn from(event: &ResumeAnalytics) -> Self {
        Self {
            id: event.id.to_string(),
            action: event.action.clone(),
            timestamp: to_bson_time(&event.timestamp),
            ip_address: event.ip_address.clone(),
        }
    }
}

fn parse_id(collection: &'static str, raw: &str) -> Result<RecordId, StoreError> {
    RecordId::parse(raw).map_err(|e| StoreError::Encoding {
        collection,
        reason: format!("id {raw:?}: {e}"),
    })
}

fn to_bson_time(ts: &Timestamp) -> bson::DateTime {
    bson::DateTime::from_millis(ts.as_millis())
}

fn from_bson_time(collection: &'static str, dt: bson::DateTime) -> Result<Timestamp, StoreError> {
    Timestamp::from_millis(dt.timestamp_millis()).ok_or_else(|| StoreError::Encoding {
        collection,
        reason: format!("date out of range: {}", dt.timestamp_millis()),
    })
}
