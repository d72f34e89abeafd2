//! SendMessage command handler.
//!
//! Runs one inbound message through the orchestrator, calling the intent
//! classifier when the dialog asks for it, and stores the resulting state.
//! Turns on the same session are serialized through [`TurnLocks`].

use std::sync::Arc;

use thiserror::Error;

use crate::application::TurnLocks;
use crate::domain::conversation::{ConversationError, DialogPhase, Orchestrator, TurnPlan};
use crate::domain::foundation::SessionId;
use crate::ports::{IntentClassifier, SessionStore, SessionStoreError};

/// Command to send a message in a conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// The conversation receiving the message.
    pub session_id: SessionId,
    /// The message text.
    pub text: String,
}

impl SendMessageCommand {
    pub fn new(session_id: SessionId, text: impl Into<String>) -> Self {
        Self {
            session_id,
            text: text.into(),
        }
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, Error)]
pub enum SendMessageError {
    /// Message text is empty or whitespace only.
    #[error("Validation error: message text cannot be empty")]
    EmptyText,

    /// No conversation with this id is open.
    #[error("Conversation not found: {0}")]
    SessionNotFound(SessionId),

    /// The dialog rejected the turn.
    #[error("Conversation error: {0}")]
    Conversation(String),

    /// Session store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<ConversationError> for SendMessageError {
    fn from(err: ConversationError) -> Self {
        SendMessageError::Conversation(err.to_string())
    }
}

impl From<SessionStoreError> for SendMessageError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SendMessageError::SessionNotFound(id),
            other => SendMessageError::Storage(other.to_string()),
        }
    }
}

/// Result of sending a message.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub session_id: SessionId,
    /// Phase the conversation rests in after the turn.
    pub phase: DialogPhase,
    /// Bot replies, in order.
    pub replies: Vec<String>,
}

/// Handler for inbound messages.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    classifier: Arc<dyn IntentClassifier>,
    orchestrator: Orchestrator,
    turn_locks: TurnLocks,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        classifier: Arc<dyn IntentClassifier>,
        orchestrator: Orchestrator,
        turn_locks: TurnLocks,
    ) -> Self {
        Self {
            store,
            classifier,
            orchestrator,
            turn_locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if cmd.text.trim().is_empty() {
            return Err(SendMessageError::EmptyText);
        }

        let _turn = self.turn_locks.acquire(cmd.session_id).await;
        let mut session = self.store.load(cmd.session_id).await?;

        let replies = match self.orchestrator.receive(&mut session, &cmd.text)? {
            TurnPlan::Reply(replies) => replies,
            TurnPlan::Classify { utterance } => {
                match self.classifier.classify(&utterance).await {
                    Ok(result) => {
                        tracing::debug!(
                            session_id = %session.id(),
                            intent = %result.top_intent,
                            score = ?result.score,
                            "utterance classified"
                        );
                        if result.entities.has_travel_details() {
                            tracing::debug!(
                                origin = ?result.entities.origin,
                                destination = ?result.entities.destination,
                                travel_date = ?result.entities.travel_date,
                                "ignoring travel details"
                            );
                        }
                        self.orchestrator.apply_classification(&mut session, &result)?
                    }
                    Err(err) => {
                        tracing::warn!(
                            session_id = %session.id(),
                            error = %err,
                            "intent classification failed"
                        );
                        self.orchestrator.classification_failed(&mut session)?
                    }
                }
            }
        };

        if !session.phase().is_resting() {
            return Err(SendMessageError::Conversation(format!(
                "turn ended in phase {}",
                session.phase()
            )));
        }
        self.store.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            phase = %session.phase(),
            turn = session.turn_count(),
            "message handled"
        );

        Ok(SendMessageResult {
            session_id: session.id(),
            phase: session.phase(),
            replies,
        })
    }
}
