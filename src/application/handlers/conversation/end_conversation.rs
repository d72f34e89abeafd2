//! EndConversation command handler.
//!
//! Discards a conversation's dialog state.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to end a conversation.
#[derive(Debug, Clone)]
pub struct EndConversationCommand {
    pub session_id: SessionId,
}

/// Errors that can occur when ending a conversation.
#[derive(Debug, Error)]
pub enum EndConversationError {
    #[error("Conversation not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for EndConversationError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => EndConversationError::NotFound(id),
            other => EndConversationError::Storage(other.to_string()),
        }
    }
}

/// Handler for ending conversations.
pub struct EndConversationHandler {
    store: Arc<dyn SessionStore>,
}

impl EndConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndConversationCommand) -> Result<(), EndConversationError> {
        self.store.delete(cmd.session_id).await?;
        tracing::info!(session_id = %cmd.session_id, "conversation ended");
        Ok(())
    }
}
