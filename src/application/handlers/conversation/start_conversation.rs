//! StartConversation command handler.
//!
//! Opens a new dialog session and returns the welcome message.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{DialogSession, Orchestrator};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to open a conversation.
#[derive(Debug, Clone, Default)]
pub struct StartConversationCommand {
    /// Id to use for the session; a random one is generated when absent.
    pub session_id: Option<SessionId>,
}

impl StartConversationCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_id(session_id: SessionId) -> Self {
        Self {
            session_id: Some(session_id),
        }
    }
}

/// Result of opening a conversation.
#[derive(Debug, Clone)]
pub struct StartConversationResult {
    pub session_id: SessionId,
    pub replies: Vec<String>,
}

/// Errors that can occur when opening a conversation.
#[derive(Debug, Error)]
pub enum StartConversationError {
    /// A session with the requested id is already open.
    #[error("Conversation already exists: {0}")]
    AlreadyExists(SessionId),

    /// Session store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for StartConversationError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::AlreadyExists(id) => StartConversationError::AlreadyExists(id),
            other => StartConversationError::Storage(other.to_string()),
        }
    }
}

/// Handler for opening conversations.
pub struct StartConversationHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Orchestrator,
}

impl StartConversationHandler {
    pub fn new(store: Arc<dyn SessionStore>, orchestrator: Orchestrator) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartConversationCommand,
    ) -> Result<StartConversationResult, StartConversationError> {
        let session = DialogSession::new(cmd.session_id.unwrap_or_default());
        self.store.create(&session).await?;

        tracing::info!(session_id = %session.id(), "conversation started");

        Ok(StartConversationResult {
            session_id: session.id(),
            replies: self.orchestrator.welcome(),
        })
    }
}
