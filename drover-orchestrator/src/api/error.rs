//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::orchestration::Operation;
use crate::service::BotError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The scheduler rejected or failed the call
    BadGateway(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => {
                tracing::error!("Scheduler error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Scheduler request failed".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<BotError> for ApiError {
    fn from(err: BotError) -> Self {
        match err {
            BotError::Configuration(e) => ApiError::InternalError(e.to_string()),
            BotError::Orchestration(e) => match e.identity.as_ref() {
                // Only a status lookup names an existing bot; a 404 elsewhere is a scheduler fault
                Some(identity) if e.is_not_found() && e.operation == Operation::QueryStatus => {
                    ApiError::NotFound(format!("Bot {} not found", identity))
                }
                _ => ApiError::BadGateway(e.to_string()),
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
