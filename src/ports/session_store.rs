//! Session store port.
//!
//! Sessions are keyed by phone number and created lazily on first
//! contact. The store is the seam where per-user locking or external
//! persistence would plug in; the in-memory adapter is last-write-wins
//! with process-lifetime retention.

use async_trait::async_trait;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{DomainError, PhoneNumber};

/// Store for per-user conversation sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for this phone, creating a fresh one if none
    /// exists yet.
    async fn get_or_create(&self, phone: &PhoneNumber) -> Result<ConversationSession, DomainError>;

    /// Persists the session after a turn. Concurrent saves for the same
    /// phone are last-write-wins.
    async fn save(&self, session: ConversationSession) -> Result<(), DomainError>;

    /// Removes a session (primarily for tests).
    async fn remove(&self, phone: &PhoneNumber) -> Result<(), DomainError>;
}
