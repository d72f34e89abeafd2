//! Dialog behaviour configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::visa::DetailCollector;

/// Dialog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogConfig {
    /// Ask the user for missing visa details instead of assuming defaults
    #[serde(default)]
    pub prompt_for_missing: bool,

    /// Seconds a conversation may sit idle before it is dropped (0 keeps them forever)
    #[serde(default = "default_session_idle_timeout")]
    pub session_idle_timeout_secs: u64,
}

fn default_session_idle_timeout() -> u64 {
    3600
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            prompt_for_missing: false,
            session_idle_timeout_secs: default_session_idle_timeout(),
        }
    }
}

impl DialogConfig {
    /// Detail collector matching this configuration
    pub fn detail_collector(&self) -> DetailCollector {
        DetailCollector::new(self.prompt_for_missing)
    }

    /// Idle timeout for conversations, `None` when eviction is disabled
    pub fn session_idle_timeout(&self) -> Option<Duration> {
        (self.session_idle_timeout_secs > 0)
            .then(|| Duration::from_secs(self.session_idle_timeout_secs))
    }
}
