//! HTTP adapters - REST API implementations.
//!
//! - `conversation` - Conversation endpoints
//! - `health` - Liveness endpoint

pub mod conversation;
pub mod health;

use axum::routing::get;
use axum::Router;

pub use conversation::{conversation_router, ConversationAppState};
pub use health::{health, HealthResponse};

/// Builds the complete API router.
///
/// # Routes
/// - `GET /health` - Liveness and classifier status
/// - `/conversations/...` - See [`conversation::conversation_routes`]
pub fn api_router(state: ConversationAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(conversation_router())
        .with_state(state)
}
