//! Google Calendar visit scheduler.
//!
//! Creates a 1-hour "Property Visit" event via the Calendar REST API.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::conversation::VisitRequest;
use crate::ports::{ScheduleError, ScheduledVisit, VisitScheduler};

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/calendars";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Books property visits in a Google Calendar.
pub struct GoogleCalendarScheduler {
    client: reqwest::Client,
    calendar_id: String,
    /// IANA timezone the visit times are interpreted in.
    timezone: String,
    token: SecretString,
}

impl GoogleCalendarScheduler {
    pub fn new(
        client: reqwest::Client,
        calendar_id: impl Into<String>,
        timezone: impl Into<String>,
        token: SecretString,
    ) -> Self {
        Self {
            client,
            calendar_id: calendar_id.into(),
            timezone: timezone.into(),
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventResponse {
    id: String,
}

/// Parses the request's "YYYY-MM-DD" / "HH:MM" pair into a local start time.
fn parse_visit_start(request: &VisitRequest) -> Result<NaiveDateTime, ScheduleError> {
    let combined = format!("{} {}", request.date, request.time);
    NaiveDateTime::parse_from_str(&combined, DATETIME_FORMAT)
        .map_err(|e| ScheduleError::InvalidDateTime(format!("{}: {}", combined, e)))
}

/// Builds the Calendar API event payload. Visits are always one hour.
fn event_body(request: &VisitRequest, start: NaiveDateTime, timezone: &str) -> serde_json::Value {
    let end = start + Duration::hours(1);
    json!({
        "summary": format!("Property Visit: {}", request.property_name),
        "description": format!(
            "Visitor: {}\nPhone: {}",
            request.visitor_name, request.visitor_phone
        ),
        "start": {
            "dateTime": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "timeZone": timezone,
        },
        "end": {
            "dateTime": end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "timeZone": timezone,
        },
    })
}

#[async_trait]
impl VisitScheduler for GoogleCalendarScheduler {
    async fn schedule(&self, request: VisitRequest) -> Result<ScheduledVisit, ScheduleError> {
        let start = parse_visit_start(&request)?;
        let url = format!("{}/{}/events", CALENDAR_API_BASE, self.calendar_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .json(&event_body(&request, start, &self.timezone))
            .send()
            .await
            .map_err(|e| ScheduleError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScheduleError::Request(format!(
                "calendar returned status {}",
                response.status()
            )));
        }

        let event: EventResponse = response
            .json()
            .await
            .map_err(|e| ScheduleError::Request(e.to_string()))?;
        info!(event_id = %event.id, property = %request.property_name, "visit scheduled");
        Ok(ScheduledVisit { event_id: event.id })
    }
}
