//! Interaction recorder port.
//!
//! Best-effort append-only log of user interactions. Failures are logged
//! by callers and never alter the conversation outcome.

use async_trait::async_trait;

use crate::domain::conversation::{InteractionRecord, InteractionStatus};
use crate::domain::foundation::{DomainError, PhoneNumber};

/// External tabular append target for interaction rows.
#[async_trait]
pub trait InteractionRecorder: Send + Sync {
    /// Appends one interaction row.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError` on write failure; callers log and move on.
    async fn append(&self, record: InteractionRecord) -> Result<(), DomainError>;

    /// Rewrites the status (and visit note, when given) of the newest row
    /// matching this phone number, scanning most-recent to oldest.
    ///
    /// A missing row is not an error; there is simply nothing to update.
    async fn update_latest_status(
        &self,
        phone: &PhoneNumber,
        status: InteractionStatus,
        schedule_note: Option<String>,
    ) -> Result<(), DomainError>;
}
