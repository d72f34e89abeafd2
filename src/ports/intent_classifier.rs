//! Intent Classifier Port - Interface for the language understanding service.
//!
//! This port abstracts the external service that turns free text into a
//! top intent and typed entities. The bot never trains or hosts the model;
//! it only queries it.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedClassifier;
//!
//! #[async_trait]
//! impl IntentClassifier for FixedClassifier {
//!     async fn classify(&self, _utterance: &str) -> Result<ClassifierResult, ClassifierError> {
//!         Ok(ClassifierResult::new("eligibility"))
//!     }
//!
//!     fn is_configured(&self) -> bool {
//!         true
//!     }
//!
//!     fn classifier_info(&self) -> ClassifierInfo {
//!         ClassifierInfo::new("fixed", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::domain::conversation::{ClassifierEntities, ClassifierResult};

/// Port for intent classification.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify a single utterance.
    async fn classify(&self, utterance: &str) -> Result<ClassifierResult, ClassifierError>;

    /// Whether the classifier has what it needs to be queried at all.
    ///
    /// When this is false the conversation skips classification and
    /// proceeds with defaults.
    fn is_configured(&self) -> bool;

    /// Get classifier information (name, application).
    fn classifier_info(&self) -> ClassifierInfo;
}

/// Classifier information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierInfo {
    /// Service name (e.g., "luis", "mock").
    pub name: String,
    /// Application or model identifier.
    pub application: String,
}

impl ClassifierInfo {
    pub fn new(name: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            application: application.into(),
        }
    }
}

/// Classifier errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// The classifier was queried without being configured.
    #[error("classifier is not configured")]
    NotConfigured,

    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Service is unavailable.
    #[error("classifier unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Subscription key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service rejected the query.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl ClassifierError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClassifierError::RateLimited { .. }
                | ClassifierError::Unavailable { .. }
                | ClassifierError::Network(_)
                | ClassifierError::Timeout { .. }
        )
    }
}
