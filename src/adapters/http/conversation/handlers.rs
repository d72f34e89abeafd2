//! HTTP handlers for conversation endpoints.
//!
//! These handlers connect Axum routes to the conversation service.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ConversationService, EndConversationCommand, EndConversationError, GetConversationError,
    GetConversationQuery, SendMessageCommand, SendMessageError, StartConversationCommand,
    StartConversationError,
};
use crate::domain::foundation::SessionId;

use super::dto::{
    ConversationResponse, EndConversationResponse, ErrorResponse, SendMessageRequest,
    SendMessageResponse, StartConversationResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for conversation routes.
#[derive(Clone)]
pub struct ConversationAppState {
    pub service: ConversationService,
}

impl ConversationAppState {
    pub fn new(service: ConversationService) -> Self {
        Self { service }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /conversations - Open a conversation
pub async fn start_conversation(
    State(state): State<ConversationAppState>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let result = state
        .service
        .start(StartConversationCommand::new())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StartConversationResponse::from(result)),
    ))
}

/// POST /conversations/:id/messages - Send a message
pub async fn send_message(
    State(state): State<ConversationAppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let session_id = parse_session_id(&id)?;
    let result = state
        .service
        .send_message(SendMessageCommand::new(session_id, request.text))
        .await?;

    Ok(Json(SendMessageResponse::from(result)))
}

/// GET /conversations/:id - Get a conversation's dialog state
pub async fn get_conversation(
    State(state): State<ConversationAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let session_id = parse_session_id(&id)?;
    let view = state
        .service
        .get(GetConversationQuery { session_id })
        .await?;

    Ok(Json(ConversationResponse::from(view)))
}

/// DELETE /conversations/:id - End a conversation
pub async fn end_conversation(
    State(state): State<ConversationAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConversationApiError> {
    let session_id = parse_session_id(&id)?;
    state
        .service
        .end(EndConversationCommand { session_id })
        .await?;

    Ok(Json(EndConversationResponse {
        session_id,
        ended: true,
    }))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ConversationApiError> {
    raw.parse()
        .map_err(|_| ConversationApiError::InvalidSessionId(raw.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ConversationApiError {
    InvalidSessionId(String),
    Start(StartConversationError),
    Send(SendMessageError),
    Get(GetConversationError),
    End(EndConversationError),
}

impl From<StartConversationError> for ConversationApiError {
    fn from(err: StartConversationError) -> Self {
        Self::Start(err)
    }
}

impl From<SendMessageError> for ConversationApiError {
    fn from(err: SendMessageError) -> Self {
        Self::Send(err)
    }
}

impl From<GetConversationError> for ConversationApiError {
    fn from(err: GetConversationError) -> Self {
        Self::Get(err)
    }
}

impl From<EndConversationError> for ConversationApiError {
    fn from(err: EndConversationError) -> Self {
        Self::End(err)
    }
}

impl ConversationApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidSessionId(_) => (StatusCode::BAD_REQUEST, "INVALID_SESSION_ID"),
            Self::Start(StartConversationError::AlreadyExists(_)) => {
                (StatusCode::CONFLICT, "SESSION_EXISTS")
            }
            Self::Send(SendMessageError::EmptyText) => (StatusCode::BAD_REQUEST, "EMPTY_MESSAGE"),
            Self::Send(SendMessageError::SessionNotFound(_))
            | Self::Get(GetConversationError::NotFound(_))
            | Self::End(EndConversationError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }
            Self::Send(SendMessageError::Conversation(_)) => {
                (StatusCode::CONFLICT, "TURN_REJECTED")
            }
            Self::Start(StartConversationError::Storage(_))
            | Self::Send(SendMessageError::Storage(_))
            | Self::Get(GetConversationError::Storage(_))
            | Self::End(EndConversationError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidSessionId(raw) => format!("Invalid session id: {}", raw),
            Self::Start(err) => err.to_string(),
            Self::Send(err) => err.to_string(),
            Self::Get(err) => err.to_string(),
            Self::End(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ConversationApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "conversation request failed");
        }
        let body = ErrorResponse::new(code, self.message());
        (status, Json(body)).into_response()
    }
}
