//! # Identity Newtypes
//!
//! [`RecordId`] is the server-assigned identifier of every stored record.
//! It is a UUID v4 and always valid by construction; on the wire and in
//! the datastore it is the hyphenated lowercase string form.
//!
//! [`EmailAddress`] validates address syntax at construction time. The
//! rules follow the common deliverable-address subset of RFC 5321/5322:
//! an unquoted local part, a dotted domain name, and a non-numeric
//! top-level label. Internationalized (non-ASCII) characters are accepted
//! in both parts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Unique identifier of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String, format = Uuid)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the hyphenated string form used in stored documents.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EmailAddress
// ---------------------------------------------------------------------------

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Printable ASCII allowed in an unquoted local part besides alphanumerics.
const LOCAL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

/// A syntactically valid e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[schema(value_type = String)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] naming the first rule the
    /// value breaks.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        match check_email(&raw) {
            Ok(()) => Ok(Self(raw)),
            Err(reason) => Err(ValidationError::InvalidEmail { value: raw, reason }),
        }
    }

    /// Wrap an address read back from the datastore without checking it.
    ///
    /// Stored documents may predate the current rules or come from other
    /// writers; syntax is only enforced on submission.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The address as submitted.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn check_email(raw: &str) -> Result<(), &'static str> {
    if raw.is_empty() {
        return Err("empty");
    }
    if raw.chars().count() > MAX_EMAIL_LEN {
        return Err("too long");
    }
    if raw.chars().any(char::is_whitespace) {
        return Err("contains whitespace");
    }
    let (local, domain) = raw.split_once('@').ok_or("missing @")?;
    if domain.contains('@') {
        return Err("more than one @");
    }
    check_local(local)?;
    check_domain(domain)
}

fn check_local(local: &str) -> Result<(), &'static str> {
    if local.is_empty() {
        return Err("empty local part");
    }
    if local.chars().count() > MAX_LOCAL_LEN {
        return Err("local part too long");
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err("misplaced dot in local part");
    }
    let allowed = |c: char| c.is_alphanumeric() || LOCAL_SPECIALS.contains(c) || !c.is_ascii();
    if !local.chars().all(allowed) {
        return Err("invalid character in local part");
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    if domain.is_empty() {
        return Err("empty domain");
    }
    if domain.chars().count() > MAX_DOMAIN_LEN {
        return Err("domain too long");
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err("domain must contain a dot");
    }
    for label in &labels {
        if label.is_empty() {
            return Err("empty domain label");
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err("domain label too long");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("domain label starts or ends with hyphen");
        }
        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err("invalid character in domain");
        }
    }
    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err("numeric top-level domain");
    }
    Ok(())
}
