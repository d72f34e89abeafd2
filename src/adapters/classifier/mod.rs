//! Intent Classifier Adapters.
//!
//! Implementations of the IntentClassifier port.
//!
//! ## Available Adapters
//!
//! - `LuisClassifier` - LUIS v3 prediction endpoint over HTTP
//! - `MockClassifier` - Configurable mock for testing

mod luis_classifier;
mod mock_classifier;

pub use luis_classifier::{LuisClassifier, LuisConfig};
pub use mock_classifier::{MockClassifier, FALLBACK_INTENT};
