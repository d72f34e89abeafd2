//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VISA_GUIDE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use visa_guide::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod classifier;
mod dialog;
mod error;
mod server;

pub use classifier::ClassifierConfig;
pub use dialog::DialogConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a server that
/// answers with default visa details. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Language understanding service configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Dialog behaviour
    #[serde(default)]
    pub dialog: DialogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VISA_GUIDE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VISA_GUIDE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VISA_GUIDE__CLASSIFIER__APP_ID=...` -> `classifier.app_id = ...`
    /// - `VISA_GUIDE__DIALOG__PROMPT_FOR_MISSING=true` -> `dialog.prompt_for_missing = true`
    /// - `VISA_GUIDE__DIALOG__SESSION_IDLE_TIMEOUT_SECS=600` -> `dialog.session_idle_timeout_secs = 600`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VISA_GUIDE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.classifier.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
