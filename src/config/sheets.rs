//! Google Sheets configuration.

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Spreadsheet backing the property catalog and interaction log.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet id from the sheet URL.
    pub spreadsheet_id: String,
    /// Range holding property rows, header row first.
    #[serde(default = "default_property_range")]
    pub property_range: String,
    /// Tab name for the interaction log.
    #[serde(default = "default_interaction_sheet")]
    pub interaction_sheet: String,
    /// OAuth bearer token for the Sheets API.
    pub token: SecretString,
}

fn default_property_range() -> String {
    "Properties!A:F".to_string()
}

fn default_interaction_sheet() -> String {
    "Interactions".to_string()
}

impl SheetsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(ValidationError::invalid(
                "sheets.spreadsheet_id",
                "cannot be empty",
            ));
        }
        if self.property_range.trim().is_empty() {
            return Err(ValidationError::invalid(
                "sheets.property_range",
                "cannot be empty",
            ));
        }
        if self.interaction_sheet.trim().is_empty() {
            return Err(ValidationError::invalid(
                "sheets.interaction_sheet",
                "cannot be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "sheet123".to_string(),
            property_range: default_property_range(),
            interaction_sheet: default_interaction_sheet(),
            token: SecretString::new("tok".to_string()),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn empty_spreadsheet_id_fails() {
        let mut c = config();
        c.spreadsheet_id = " ".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn defaults_cover_ranges() {
        assert_eq!(default_property_range(), "Properties!A:F");
        assert_eq!(default_interaction_sheet(), "Interactions");
    }
}
