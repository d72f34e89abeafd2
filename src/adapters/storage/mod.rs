//! Storage Adapters
//!
//! Implementations of the SessionStore port for keeping dialog state between turns.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Stores sessions in process memory

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
