//! In-Memory Session Store Adapter
//!
//! Holds conversation sessions in a process-local map. Sessions vanish on
//! restart and are never expired; concurrent saves for the same phone are
//! last-write-wins with no per-user locking. All accepted limitations of
//! the single-instance deployment.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{DomainError, PhoneNumber};
use crate::ports::SessionStore;

/// In-memory store for conversation sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<PhoneNumber, ConversationSession>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (useful for tests).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, phone: &PhoneNumber) -> Result<ConversationSession, DomainError> {
        if let Some(session) = self.sessions.read().await.get(phone) {
            return Ok(session.clone());
        }
        let session = ConversationSession::new(phone.clone());
        self.sessions
            .write()
            .await
            .entry(phone.clone())
            .or_insert_with(|| session.clone());
        Ok(session)
    }

    async fn save(&self, session: ConversationSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.phone().clone(), session);
        Ok(())
    }

    async fn remove(&self, phone: &PhoneNumber) -> Result<(), DomainError> {
        self.sessions.write().await.remove(phone);
        Ok(())
    }
}
