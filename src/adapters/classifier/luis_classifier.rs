//! LUIS Classifier - Implementation of IntentClassifier for a LUIS v3 prediction endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LuisConfig::new("https://westus.api.cognitive.microsoft.com")
//!     .with_app_id("00000000-0000-0000-0000-000000000000")
//!     .with_api_key(api_key)
//!     .with_slot("production");
//!
//! let classifier = LuisClassifier::new(config)?;
//! ```
//!
//! # Entities
//!
//! LUIS returns entities in several shapes: plain strings for simple
//! entities, nested arrays for list entities (`[["f1"]]`) and objects for
//! composite or prebuilt ones (`[{"Airport": [["Paris"]]}]`). Every value is
//! flattened to its first text leaf as soon as the response is parsed, so
//! the rest of the bot only ever sees [`ClassifierEntities`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    ClassifierEntities, ClassifierError, ClassifierInfo, ClassifierResult, IntentClassifier,
};

const VISA_TYPE_ENTITY: &str = "visa_type";
const WORK_TYPE_ENTITY: &str = "work_type";
const OCCUPATION_STATUS_ENTITY: &str = "occupation_status";
const ORIGIN_ENTITY: &str = "From";
const DESTINATION_ENTITY: &str = "To";
const DATE_ENTITY: &str = "datetime";

/// Configuration for the LUIS classifier.
#[derive(Debug, Clone)]
pub struct LuisConfig {
    /// Prediction resource endpoint, e.g. `https://westus.api.cognitive.microsoft.com`.
    pub endpoint: String,
    /// LUIS application id.
    pub app_id: Option<String>,
    /// Prediction subscription key.
    api_key: Option<Secret<String>>,
    /// Publishing slot ("production" or "staging").
    pub slot: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub retry_backoff: Duration,
}

impl LuisConfig {
    /// Creates a configuration for the given endpoint with no credentials.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            app_id: None,
            api_key: None,
            slot: "production".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Sets the application id.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Sets the subscription key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the publishing slot.
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the initial retry delay.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// True when endpoint, application id and key are all present.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty()
            && self.app_id.as_ref().is_some_and(|id| !id.trim().is_empty())
            && self
                .api_key
                .as_ref()
                .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Exposes the subscription key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// LUIS prediction API classifier.
pub struct LuisClassifier {
    config: LuisConfig,
    client: Client,
}

impl LuisClassifier {
    /// Creates a new classifier with the given configuration.
    ///
    /// An unconfigured `LuisConfig` is accepted; the classifier then reports
    /// `is_configured() == false` and is never queried.
    pub fn new(config: LuisConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the prediction endpoint URL.
    fn prediction_url(&self, app_id: &str) -> String {
        format!(
            "{}/luis/prediction/v3.0/apps/{}/slots/{}/predict",
            self.config.endpoint.trim_end_matches('/'),
            app_id,
            self.config.slot
        )
    }

    /// Sends one prediction request.
    async fn send_request(&self, utterance: &str) -> Result<Response, ClassifierError> {
        let (app_id, api_key) = match (self.config.app_id.as_deref(), self.config.api_key()) {
            (Some(app_id), Some(api_key)) if self.config.is_configured() => (app_id, api_key),
            _ => return Err(ClassifierError::NotConfigured),
        };

        self.client
            .get(self.prediction_url(app_id))
            .query(&[
                ("query", utterance),
                ("subscription-key", api_key),
                ("show-all-intents", "false"),
                ("verbose", "false"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ClassifierError::network(format!("Connection failed: {}", e))
                } else {
                    ClassifierError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        Err(status_error(status.as_u16(), &error_body, retry_after))
    }

    async fn classify_once(&self, utterance: &str) -> Result<ClassifierResult, ClassifierError> {
        let response = self.send_request(utterance).await?;
        let response = self.handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::network(format!("Failed to read response: {}", e)))?;
        parse_prediction(&body)
    }
}

/// Maps a non-success HTTP status to a classifier error.
fn status_error(status: u16, body: &str, retry_after: Option<u32>) -> ClassifierError {
    match status {
        401 | 403 => ClassifierError::AuthenticationFailed,
        429 => ClassifierError::rate_limited(retry_after.unwrap_or(1)),
        400 | 404 => ClassifierError::InvalidRequest(format!("status {}: {}", status, body)),
        500..=599 => ClassifierError::unavailable(format!("Server error {}: {}", status, body)),
        _ => ClassifierError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Delay before retry number `attempt + 1`.
///
/// Exponential backoff (base, 2x base, 4x base, ...), but never shorter than
/// the service's `Retry-After` when it rate limited us.
fn retry_delay(base: Duration, attempt: u32, err: &ClassifierError) -> Duration {
    let backoff = base.saturating_mul(1u32 << attempt.min(16));
    match err {
        ClassifierError::RateLimited { retry_after_secs } => {
            backoff.max(Duration::from_secs(u64::from(*retry_after_secs)))
        }
        _ => backoff,
    }
}

#[derive(Debug, Deserialize)]
struct LuisResponse {
    prediction: LuisPrediction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisPrediction {
    top_intent: String,
    #[serde(default)]
    intents: HashMap<String, LuisIntent>,
    #[serde(default)]
    entities: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    score: Option<f64>,
}

/// Parses a v3 prediction body into a canonical classification.
fn parse_prediction(body: &str) -> Result<ClassifierResult, ClassifierError> {
    let response: LuisResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierError::parse(format!("Failed to parse prediction: {}", e)))?;
    let prediction = response.prediction;

    let score = prediction
        .intents
        .get(&prediction.top_intent)
        .and_then(|intent| intent.score);
    let entity = |name: &str| prediction.entities.get(name).and_then(first_text);

    let entities = ClassifierEntities {
        visa_type: entity(VISA_TYPE_ENTITY),
        work_type: entity(WORK_TYPE_ENTITY),
        occupation_status: entity(OCCUPATION_STATUS_ENTITY),
        origin: entity(ORIGIN_ENTITY),
        destination: entity(DESTINATION_ENTITY),
        travel_date: entity(DATE_ENTITY),
    };

    let mut result = ClassifierResult::new(prediction.top_intent).with_entities(entities);
    if let Some(score) = score {
        result = result.with_score(score);
    }
    Ok(result)
}

/// First non-empty text leaf of an entity value.
///
/// Datetime objects are read through `timex`/`value` before any other key.
fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        Value::Object(fields) => ["timex", "value", "values", "text"]
            .iter()
            .filter_map(|key| fields.get(*key))
            .find_map(first_text)
            .or_else(|| {
                fields
                    .iter()
                    .filter(|(key, _)| !key.starts_with('$') && key.as_str() != "type")
                    .find_map(|(_, v)| first_text(v))
            }),
        Value::Bool(_) | Value::Null => None,
    }
}

#[async_trait]
impl IntentClassifier for LuisClassifier {
    async fn classify(&self, utterance: &str) -> Result<ClassifierResult, ClassifierError> {
        let mut retry_count = 0;

        loop {
            let err = match self.classify_once(utterance).await {
                Ok(result) => {
                    tracing::debug!(
                        top_intent = %result.top_intent,
                        score = ?result.score,
                        "LUIS prediction received"
                    );
                    return Ok(result);
                }
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(attempt = retry_count + 1, error = %err, "LUIS request failed, retrying");
                    err
                }
            };

            sleep(retry_delay(self.config.retry_backoff, retry_count, &err)).await;
            retry_count += 1;
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn classifier_info(&self) -> ClassifierInfo {
        ClassifierInfo::new("luis", self.config.app_id.clone().unwrap_or_default())
    }
}
