//! Session Store Port - Interface for keeping dialog sessions between turns.
//!
//! A conversation suspends after every reply; its state is written here and
//! loaded again when the next message for the session arrives.

use async_trait::async_trait;

use crate::domain::conversation::DialogSession;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for persisting and loading dialog sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a newly opened session
    ///
    /// # Errors
    /// Returns `SessionStoreError::AlreadyExists` if the id is taken
    async fn create(&self, session: &DialogSession) -> Result<(), SessionStoreError>;

    /// Save a session after a turn, replacing the stored copy
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the session was deleted;
    /// saving never brings an ended conversation back
    async fn save(&self, session: &DialogSession) -> Result<(), SessionStoreError>;

    /// Load a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn load(&self, id: SessionId) -> Result<DialogSession, SessionStoreError>;

    /// Check if a session exists
    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError>;

    /// Delete a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError>;
}
