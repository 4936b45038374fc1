//! Bot DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{JobPhase, JobStatus};

/// Body of `POST /bots/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Response of `POST /bots/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotCreated {
    pub message: String,
    pub job_name: String,
    pub status: JobStatus,
}

/// Response of `GET /bots/{job_name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStatus {
    pub job_name: String,
    pub status: JobPhase,
    #[serde(default)]
    pub details: Option<JobStatus>,
    pub logs: String,
}

/// Response of `DELETE /bots/{job_name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStopped {
    pub message: String,
}

/// Entry of `GET /bots`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSummary {
    pub job_name: String,
    pub symbol: Option<String>,
    pub phase: JobPhase,
}
