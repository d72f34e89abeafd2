//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `classifier` - Intent classifier implementations (LUIS, mock)
//! - `storage` - Session store implementations
//! - `http` - REST surface over the conversation service

pub mod classifier;
pub mod http;
pub mod storage;

pub use classifier::{LuisClassifier, LuisConfig, MockClassifier};
pub use storage::InMemorySessionStore;
