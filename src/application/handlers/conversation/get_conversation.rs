//! GetConversationHandler - Query handler for a conversation's dialog state.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{Awaiting, DialogPhase, DialogSession};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

/// Query to get a conversation.
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub session_id: SessionId,
}

/// Read model of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationView {
    pub session_id: SessionId,
    pub phase: DialogPhase,
    pub awaiting: Awaiting,
    pub turn_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&DialogSession> for ConversationView {
    fn from(session: &DialogSession) -> Self {
        Self {
            session_id: session.id(),
            phase: session.phase(),
            awaiting: session.awaiting(),
            turn_count: session.turn_count(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Errors that can occur when reading a conversation.
#[derive(Debug, Error)]
pub enum GetConversationError {
    #[error("Conversation not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for GetConversationError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => GetConversationError::NotFound(id),
            other => GetConversationError::Storage(other.to_string()),
        }
    }
}

/// Handler for getting conversations.
pub struct GetConversationHandler {
    store: Arc<dyn SessionStore>,
}

impl GetConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetConversationQuery,
    ) -> Result<ConversationView, GetConversationError> {
        let session = self.store.load(query.session_id).await?;
        Ok(ConversationView::from(&session))
    }
}
