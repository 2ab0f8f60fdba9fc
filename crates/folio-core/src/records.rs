//! # Record Types
//!
//! Input shapes (`*Create`, [`ResumeAction`]) and stored shapes
//! ([`StatusCheck`], [`ContactMessage`], [`ResumeAnalytics`]) for the three
//! collections the service writes. Stored records are created once by the
//! handler that receives them and are never updated here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constraints::LengthRule;
use crate::error::ValidationError;
use crate::identity::{EmailAddress, RecordId};
use crate::temporal::Timestamp;

// -- Status checks ------------------------------------------------------------

/// A client check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCheck {
    /// Server-assigned identifier.
    pub id: RecordId,
    /// Name the client reported.
    pub client_name: String,
    /// Creation time.
    pub timestamp: Timestamp,
}

/// Body of `POST /api/status`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusCheckCreate {
    /// Name the client reports.
    pub client_name: String,
}

impl StatusCheck {
    /// Stamp a new status check with a fresh id and the current time.
    pub fn new(input: StatusCheckCreate) -> Self {
        Self {
            id: RecordId::new(),
            client_name: input.client_name,
            timestamp: Timestamp::now(),
        }
    }
}

// -- Contact messages ---------------------------------------------------------

/// Moderation state of a contact message.
///
/// This service only ever writes [`ContactStatus::NEW`]. Whatever works
/// through the inbox may store any other label, so the value is kept as
/// an open string rather than a fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "new")]
pub struct ContactStatus(String);

impl ContactStatus {
    /// Label given to every freshly submitted message.
    pub const NEW: &'static str = "new";

    /// Wrap a stored label as-is.
    pub fn from_stored(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Stored string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the message has not been looked at yet.
    pub fn is_new(&self) -> bool {
        self.0 == Self::NEW
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self(Self::NEW.to_string())
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactMessageCreate {
    /// Sender name, 2–100 characters.
    #[schema(min_length = 2, max_length = 100)]
    pub name: String,
    /// Sender e-mail address.
    pub email: String,
    /// Subject line, 5–200 characters.
    #[schema(min_length = 5, max_length = 200)]
    pub subject: String,
    /// Message body, 10–2000 characters.
    #[schema(min_length = 10, max_length = 2000)]
    pub message: String,
}

impl ContactMessageCreate {
    /// Check every field constraint in body order, reporting the first
    /// violation.
    ///
    /// # Errors
    ///
    /// The [`ValidationError`] for the first field that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        LengthRule::CONTACT_NAME.check(&self.name)?;
        EmailAddress::new(self.email.as_str())?;
        LengthRule::CONTACT_SUBJECT.check(&self.subject)?;
        LengthRule::CONTACT_MESSAGE.check(&self.message)?;
        Ok(())
    }
}

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContactMessage {
    /// Server-assigned identifier.
    pub id: RecordId,
    /// Sender name.
    pub name: String,
    /// Sender e-mail address.
    pub email: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Submission time.
    pub created_at: Timestamp,
    /// Moderation state.
    #[serde(default)]
    pub status: ContactStatus,
}

impl ContactMessage {
    /// Validate a submission and turn it into a new record with status
    /// [`ContactStatus::NEW`].
    ///
    /// # Errors
    ///
    /// The first constraint the submission violates.
    pub fn from_submission(input: ContactMessageCreate) -> Result<Self, ValidationError> {
        input.validate()?;
        let email = EmailAddress::new(input.email)?;
        Ok(Self {
            id: RecordId::new(),
            name: input.name,
            email,
            subject: input.subject,
            message: input.message,
            created_at: Timestamp::now(),
            status: ContactStatus::default(),
        })
    }
}

// -- Resume analytics ---------------------------------------------------------

/// Body of `POST /api/resume-analytics`.
///
/// `action` is conventionally [`ResumeAnalytics::DOWNLOAD`] or
/// [`ResumeAnalytics::VIEW`] but any string is accepted and stored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResumeAction {
    /// What the visitor did.
    #[schema(example = "download")]
    pub action: String,
}

/// One resume interaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResumeAnalytics {
    /// Server-assigned identifier.
    pub id: RecordId,
    /// What the visitor did.
    pub action: String,
    /// Event time.
    pub timestamp: Timestamp,
    /// Caller address as seen by the server, when known.
    pub ip_address: Option<String>,
}

impl ResumeAnalytics {
    /// The resume file was downloaded.
    pub const DOWNLOAD: &'static str = "download";
    /// The resume page was viewed.
    pub const VIEW: &'static str = "view";

    /// Stamp a new event.
    pub fn record(input: ResumeAction, ip_address: Option<String>) -> Self {
        Self {
            id: RecordId::new(),
            action: input.action,
            timestamp: Timestamp::now(),
            ip_address,
        }
    }
}
