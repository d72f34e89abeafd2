//! Axum routes for conversation endpoints.
//!
//! Defines the routing table for all conversation-related HTTP endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    end_conversation, get_conversation, send_message, start_conversation, ConversationAppState,
};

/// Creates routes for conversation endpoints.
///
/// REST Endpoints:
/// - POST / - Open a conversation
/// - GET /:id - Get dialog state
/// - DELETE /:id - End a conversation
/// - POST /:id/messages - Send a message
pub fn conversation_routes() -> Router<ConversationAppState> {
    Router::new()
        .route("/", post(start_conversation))
        .route("/:id", get(get_conversation).delete(end_conversation))
        .route("/:id/messages", post(send_message))
}

/// Conversation routes mounted under /conversations.
pub fn conversation_router() -> Router<ConversationAppState> {
    Router::new().nest("/conversations", conversation_routes())
}
