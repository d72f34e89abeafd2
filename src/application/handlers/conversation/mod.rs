//! Conversation command and query handlers.
//!
//! Handles opening conversations, inbound messages, reading dialog state
//! and closing conversations.

mod end_conversation;
mod get_conversation;
mod send_message;
mod start_conversation;

pub use end_conversation::{EndConversationCommand, EndConversationError, EndConversationHandler};
pub use get_conversation::{
    ConversationView, GetConversationError, GetConversationHandler, GetConversationQuery,
};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
};
pub use start_conversation::{
    StartConversationCommand, StartConversationError, StartConversationHandler,
    StartConversationResult,
};
