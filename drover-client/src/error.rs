//! Client errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The orchestrator could not be reached or the transfer broke off
    #[error("request to orchestrator failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The orchestrator answered with a non-2xx status
    #[error("orchestrator returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body did not match the expected DTO
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// The bot does not exist (or is already gone)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Rejected request: fix the input, don't retry
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }

    /// Orchestrator or scheduler side failure
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}
