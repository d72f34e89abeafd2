//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IntentClassifier` - The external language understanding service
//! - `SessionStore` - Dialog state kept between inbound messages

mod intent_classifier;
mod session_store;

pub use intent_classifier::{
    ClassifierEntities, ClassifierError, ClassifierInfo, ClassifierResult, IntentClassifier,
};
pub use session_store::{SessionStore, SessionStoreError};
