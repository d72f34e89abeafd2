//! Health endpoint.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use super::conversation::ConversationAppState;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether messages are classified or answered with defaults.
    pub classifier_configured: bool,
}

/// GET /health
pub async fn health(State(state): State<ConversationAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        classifier_configured: state.service.classifier_configured(),
    })
}
