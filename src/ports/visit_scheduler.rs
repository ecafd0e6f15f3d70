//! Visit scheduler port.
//!
//! Books property visits in an external calendar. Events are fixed at one
//! hour. A failure surfaces its message in the user reply but leaves the
//! conversation intact.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::VisitRequest;

/// Errors from the external calendar service.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("calendar request failed: {0}")]
    Request(String),

    #[error("invalid visit date/time: {0}")]
    InvalidDateTime(String),
}

/// A successfully booked visit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledVisit {
    /// Provider event id.
    pub event_id: String,
}

/// External calendar booking service.
#[async_trait]
pub trait VisitScheduler: Send + Sync {
    /// Creates a 1-hour calendar event for the visit.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` on unparseable date/time or provider
    /// failure; the error text is shown to the user.
    async fn schedule(&self, request: VisitRequest) -> Result<ScheduledVisit, ScheduleError>;
}
