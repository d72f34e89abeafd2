//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, state machine trait, errors)
//! - `visa` - Inquiry record, detail collection and the guidance table
//! - `conversation` - Dialog phases, sessions and the orchestrator

pub mod conversation;
pub mod foundation;
pub mod visa;
