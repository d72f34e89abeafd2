//! Intent classifier configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::classifier::LuisConfig;

/// Language understanding service configuration.
///
/// Leaving `app_id` or `api_key` unset runs the bot without classification:
/// every request is answered with the default visa details.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Prediction resource endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// LUIS application id
    pub app_id: Option<String>,

    /// Prediction subscription key
    pub api_key: Option<Secret<String>>,

    /// Publishing slot
    #[serde(default = "default_slot")]
    pub slot: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl ClassifierConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if both the application id and the key are set
    pub fn is_configured(&self) -> bool {
        self.app_id.as_ref().is_some_and(|id| !id.trim().is_empty())
            && self
                .api_key
                .as_ref()
                .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Build the adapter configuration
    pub fn luis_config(&self) -> LuisConfig {
        let mut config = LuisConfig::new(self.endpoint.trim_end_matches('/'))
            .with_slot(self.slot.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries);
        if let Some(app_id) = &self.app_id {
            config = config.with_app_id(app_id.clone());
        }
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key.expose_secret().clone());
        }
        config
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 10 {
            return Err(ValidationError::TooManyRetries);
        }
        if self.slot.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CLASSIFIER__SLOT"));
        }
        // Credentials may be absent, but only when both are.
        if self.is_configured() {
            if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidClassifierEndpoint);
            }
        } else if self.app_id.is_some() != self.api_key.is_some() {
            return Err(ValidationError::PartialClassifierCredentials);
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            app_id: None,
            api_key: None,
            slot: default_slot(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_endpoint() -> String {
    "https://westus.api.cognitive.microsoft.com".to_string()
}

fn default_slot() -> String {
    "production".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}
