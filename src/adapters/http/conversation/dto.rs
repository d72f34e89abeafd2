//! HTTP DTOs for conversation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{ConversationView, SendMessageResult, StartConversationResult};
use crate::domain::conversation::{Awaiting, DialogPhase};
use crate::domain::foundation::{SessionId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    /// The user's message text.
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response after opening a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationResponse {
    pub session_id: SessionId,
    pub replies: Vec<String>,
}

impl From<StartConversationResult> for StartConversationResponse {
    fn from(result: StartConversationResult) -> Self {
        Self {
            session_id: result.session_id,
            replies: result.replies,
        }
    }
}

/// Response after a message was handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub session_id: SessionId,
    /// Phase the conversation rests in.
    pub phase: DialogPhase,
    /// Bot replies, in order.
    pub replies: Vec<String>,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            session_id: result.session_id,
            phase: result.phase,
            replies: result.replies,
        }
    }
}

/// View of a conversation's dialog state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub session_id: SessionId,
    pub phase: DialogPhase,
    /// What the next message will be taken as.
    pub awaiting: Awaiting,
    pub turn_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ConversationView> for ConversationResponse {
    fn from(view: ConversationView) -> Self {
        Self {
            session_id: view.session_id,
            phase: view.phase,
            awaiting: view.awaiting,
            turn_count: view.turn_count,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// Response after ending a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndConversationResponse {
    pub session_id: SessionId,
    pub ended: bool,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
