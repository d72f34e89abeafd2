//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from query handlers (read).

mod conversation_service;
pub mod handlers;
mod turn_locks;

pub use conversation_service::{ConversationService, ConversationServiceBuilder, SetupError};
pub use handlers::conversation::{
    ConversationView, EndConversationCommand, EndConversationError, GetConversationError,
    GetConversationQuery, SendMessageCommand, SendMessageError, SendMessageResult,
    StartConversationCommand, StartConversationError, StartConversationResult,
};
pub use turn_locks::TurnLocks;
