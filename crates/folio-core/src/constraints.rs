//! # Field Constraints
//!
//! Character-length bounds for contact-form fields. Lengths count Unicode
//! scalar values, so `"é"` is one character regardless of its UTF-8 width.

use crate::error::ValidationError;

/// Inclusive character-length bounds for one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRule {
    /// Field name as it appears in the request body.
    pub field: &'static str,
    /// Minimum accepted length.
    pub min: usize,
    /// Maximum accepted length.
    pub max: usize,
}

impl LengthRule {
    /// Contact sender name: 2–100 characters.
    pub const CONTACT_NAME: Self = Self::new("name", 2, 100);
    /// Contact subject line: 5–200 characters.
    pub const CONTACT_SUBJECT: Self = Self::new("subject", 5, 200);
    /// Contact message body: 10–2000 characters.
    pub const CONTACT_MESSAGE: Self = Self::new("message", 10, 2000);

    /// Declare a rule.
    pub const fn new(field: &'static str, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }

    /// Check `value` against the bounds.
    ///
    /// # Errors
    ///
    /// [`ValidationError::TooShort`] or [`ValidationError::TooLong`].
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let actual = value.chars().count();
        if actual < self.min {
            return Err(ValidationError::TooShort {
                field: self.field,
                min: self.min,
                actual,
            });
        }
        if actual > self.max {
            return Err(ValidationError::TooLong {
                field: self.field,
                max: self.max,
                actual,
            });
        }
        Ok(())
    }
}
