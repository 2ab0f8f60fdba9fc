#![deny(missing_docs)]

//! # folio-core — Foundational Types for the Portfolio Backend
//!
//! Every record the service persists, and every rule a request body must
//! satisfy before it is persisted, is defined here. The crate performs no
//! I/O; it depends only on `serde`, `thiserror`, `chrono`, `uuid`, and
//! `utoipa` (schema derivation for the API layer).
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Record identifiers are
//!    [`RecordId`], creation times are [`Timestamp`], and a syntactically
//!    valid e-mail is an [`EmailAddress`]. Each validates (or is valid by
//!    construction) at the boundary.
//!
//! 2. **Input shapes and stored shapes are distinct types.** A
//!    [`ContactMessageCreate`] is what a caller sends; a [`ContactMessage`]
//!    is what the datastore holds. The only path from one to the other is
//!    [`ContactMessage::from_submission`], which requires a validated input.
//!
//! 3. **[`ValidationError`] names the violated constraint.** One variant per
//!    rule kind, carrying the field and the bound, so the API layer can
//!    report exactly which constraint failed.

pub mod constraints;
pub mod error;
pub mod identity;
pub mod records;
pub mod temporal;

pub use constraints::LengthRule;
pub use error::ValidationError;
pub use identity::{EmailAddress, RecordId};
pub use records::{
    ContactMessage, ContactMessageCreate, ContactStatus, ResumeAction, ResumeAnalytics,
    StatusCheck, StatusCheckCreate,
};
pub use temporal::Timestamp;
