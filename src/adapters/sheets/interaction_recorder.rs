//! Spreadsheet-backed interaction recorder.
//!
//! Appends one row per qualified search to an interactions tab with
//! columns `Timestamp, Phone Number, Property Type, Budget, Location,
//! Selected Property, Visit Schedule, Status` (A through H). Status
//! updates rewrite columns G:H of the newest row for the phone number.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::conversation::{InteractionRecord, InteractionStatus};
use crate::domain::foundation::{DomainError, ErrorCode, PhoneNumber};
use crate::ports::InteractionRecorder;

use super::{cell_text, SHEETS_API_BASE};

// Column positions within A:H.
const COL_PHONE: usize = 1;
const COL_SCHEDULE: usize = 6;

/// Writes interaction rows to a Google Sheets tab.
pub struct SheetInteractionRecorder {
    client: reqwest::Client,
    spreadsheet_id: String,
    /// Tab name, e.g. "Interactions".
    sheet: String,
    token: SecretString,
}

impl SheetInteractionRecorder {
    pub fn new(
        client: reqwest::Client,
        spreadsheet_id: impl Into<String>,
        sheet: impl Into<String>,
        token: SecretString,
    ) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            sheet: sheet.into(),
            token,
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE, self.spreadsheet_id, range
        )
    }

    async fn fetch_all(&self) -> Result<Vec<Vec<serde_json::Value>>, DomainError> {
        let url = self.values_url(&format!("{}!A:H", self.sheet));
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(|e| recorder_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(recorder_error(format!(
                "sheets returned status {}",
                response.status()
            )));
        }
        let payload: ValueRange = response
            .json()
            .await
            .map_err(|e| recorder_error(e.to_string()))?;
        Ok(payload.values)
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn recorder_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::RecorderError, message)
}

/// Flattens a record into one sheet row, column order A through H.
fn record_to_row(record: &InteractionRecord) -> Vec<String> {
    vec![
        record.timestamp.to_rfc3339(),
        record.phone.to_string(),
        record.property_type.clone(),
        record.budget.to_string(),
        record.location.clone(),
        record.selected_property.clone(),
        record.visit_schedule.clone(),
        record.status.as_sheet_value().to_string(),
    ]
}

/// Finds the newest row for a phone number, scanning bottom-up.
///
/// Returns the 1-based sheet row number and the existing visit-schedule
/// cell. Row 1 is the header and never matches a phone value.
fn find_latest_row(
    values: &[Vec<serde_json::Value>],
    phone: &PhoneNumber,
) -> Option<(usize, String)> {
    values
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(_, row)| {
            row.get(COL_PHONE)
                .map(|cell| cell_text(cell) == phone.as_str())
                .unwrap_or(false)
        })
        .map(|(index, row)| {
            let schedule = row.get(COL_SCHEDULE).map(cell_text).unwrap_or_default();
            (index + 1, schedule)
        })
}

#[async_trait]
impl InteractionRecorder for SheetInteractionRecorder {
    async fn append(&self, record: InteractionRecord) -> Result<(), DomainError> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED",
            self.values_url(&format!("{}!A:H", self.sheet))
        );
        let body = json!({ "values": [record_to_row(&record)] });
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| recorder_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(recorder_error(format!(
                "append returned status {}",
                response.status()
            )));
        }
        debug!(phone = %record.phone, status = %record.status, "appended interaction row");
        Ok(())
    }

    async fn update_latest_status(
        &self,
        phone: &PhoneNumber,
        status: InteractionStatus,
        schedule_note: Option<String>,
    ) -> Result<(), DomainError> {
        let values = self.fetch_all().await?;
        let Some((row_number, existing_schedule)) = find_latest_row(&values, phone) else {
            // Nothing recorded yet for this phone; nothing to update.
            debug!(phone = %phone, "no interaction row to update");
            return Ok(());
        };

        let schedule = schedule_note.unwrap_or(existing_schedule);
        let range = format!("{}!G{}:H{}", self.sheet, row_number, row_number);
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&range)
        );
        let body = json!({ "values": [[schedule, status.as_sheet_value()]] });
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| recorder_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(recorder_error(format!(
                "update returned status {}",
                response.status()
            )));
        }
        debug!(phone = %phone, status = %status, row = row_number, "updated interaction status");
        Ok(())
    }
}
