//! In-Memory Session Store Adapter
//!
//! Keeps dialog sessions in a process-local map. Sessions are lost when the
//! process exits, which matches the bot's no-persistence behaviour.
//!
//! Nothing is evicted on its own; the host calls
//! [`InMemorySessionStore::evict_idle`] periodically to drop abandoned
//! conversations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::conversation::DialogSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for dialog sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, DialogSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Remove sessions not updated for longer than `max_idle`.
    ///
    /// Returns the number of sessions removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.updated_at().is_older_than(max_idle));
        before - sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &DialogSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id()) {
            return Err(SessionStoreError::AlreadyExists(session.id()));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn save(&self, session: &DialogSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.id()) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(SessionStoreError::NotFound(session.id())),
        }
    }

    async fn load(&self, id: SessionId) -> Result<DialogSession, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.read().await.contains_key(&id))
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }
}
