//! Google Calendar configuration.

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Calendar receiving property-visit events.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Target calendar id.
    pub calendar_id: String,
    /// IANA timezone visit times are interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// OAuth bearer token for the Calendar API.
    pub token: SecretString,
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.calendar_id.trim().is_empty() {
            return Err(ValidationError::invalid(
                "calendar.calendar_id",
                "cannot be empty",
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(ValidationError::invalid("calendar.timezone", "cannot be empty"));
        }
        Ok(())
    }
}
