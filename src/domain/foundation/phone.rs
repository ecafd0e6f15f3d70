//! Phone number value object.
//!
//! The phone number is the session key: every inbound message carries the
//! sender in the `From` field, WhatsApp-prefixed (`whatsapp:+9198...`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Validated phone number identifying a conversation participant.
///
/// Stored in the normalized transport form, e.g. `whatsapp:+919812345678`
/// or a bare `+919812345678`. Only non-emptiness and charset are checked;
/// the transport has already authenticated the sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a phone number from transport input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the value is empty or contains
    /// characters outside the `whatsapp:+digits` alphabet.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }
        let digits = trimmed.strip_prefix("whatsapp:").unwrap_or(trimmed);
        let digits = digits.strip_prefix('+').unwrap_or(digits);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "phone",
                "expected optional whatsapp:/+ prefix followed by digits",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the phone number as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
