//! Mock Intent Classifier for testing.
//!
//! Provides a configurable mock implementation of the IntentClassifier port,
//! allowing tests to run without calling the real language service.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockClassifier::new()
//!     .with_result(ClassifierResult::new("eligibility"))
//!     .with_error(ClassifierError::unavailable("down"));
//!
//! let result = classifier.classify("can I work?").await?;
//! assert_eq!(result.top_intent, "eligibility");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ClassifierError, ClassifierInfo, ClassifierResult, IntentClassifier};

/// Intent reported once the configured responses run out.
pub const FALLBACK_INTENT: &str = "None";

/// Mock classifier for testing.
///
/// Responses are consumed in order; utterances are recorded for verification.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    responses: Arc<Mutex<VecDeque<Result<ClassifierResult, ClassifierError>>>>,
    configured: bool,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClassifier {
    /// Creates a configured mock with no queued responses.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            configured: true,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that reports itself as not configured.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Queues a successful classification.
    pub fn with_result(self, result: ClassifierResult) -> Self {
        self.lock_responses().push_back(Ok(result));
        self
    }

    /// Queues a classification with just an intent label.
    pub fn with_intent(self, intent: impl Into<String>) -> Self {
        self.with_result(ClassifierResult::new(intent))
    }

    /// Queues an error.
    pub fn with_error(self, error: ClassifierError) -> Self {
        self.lock_responses().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this classifier.
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// Returns all classified utterances.
    pub fn get_calls(&self) -> Vec<String> {
        self.lock_calls().clone()
    }

    fn lock_responses(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<ClassifierResult, ClassifierError>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(&self, utterance: &str) -> Result<ClassifierResult, ClassifierError> {
        if !self.configured {
            return Err(ClassifierError::NotConfigured);
        }

        self.lock_calls().push(utterance.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Ok(ClassifierResult::new(FALLBACK_INTENT)))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn classifier_info(&self) -> ClassifierInfo {
        ClassifierInfo::new("mock", "mock-app")
    }
}
