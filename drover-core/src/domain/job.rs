//! Job status domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::JobIdentity;

/// Status block reported by the scheduler for one job
///
/// Field names follow the Kubernetes `batch/v1` JobStatus so the block can be
/// carried over the wire as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<JobCondition>,
}

/// One condition entry (`Complete`, `Failed`, `Suspended`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Coarse lifecycle phase of a bot job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPhase {
    /// Accepted by the scheduler, no pod running yet
    Submitted,
    Running,
    Succeeded,
    Failed,
    /// The backend could not tell
    Unknown,
}

impl JobStatus {
    /// Derives the phase: terminal conditions win, then active pods
    pub fn phase(&self) -> JobPhase {
        if self.has_condition("Failed") {
            return JobPhase::Failed;
        }
        if self.has_condition("Complete") {
            return JobPhase::Succeeded;
        }
        if self.active.unwrap_or(0) > 0 {
            return JobPhase::Running;
        }
        JobPhase::Submitted
    }

    fn has_condition(&self, condition_type: &str) -> bool {
        self.conditions
            .iter()
            .any(|c| c.condition_type == condition_type && c.status == "True")
    }
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobPhase::Submitted => write!(f, "Submitted"),
            JobPhase::Running => write!(f, "Running"),
            JobPhase::Succeeded => write!(f, "Succeeded"),
            JobPhase::Failed => write!(f, "Failed"),
            JobPhase::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of a status query: phase, raw status if known, recent log lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub identity: JobIdentity,
    pub phase: JobPhase,
    pub status: Option<JobStatus>,
    pub logs: Vec<String>,
}

impl JobReport {
    pub fn unknown(identity: JobIdentity) -> Self {
        Self {
            identity,
            phase: JobPhase::Unknown,
            status: None,
            logs: Vec::new(),
        }
    }

    pub fn from_status(identity: JobIdentity, status: JobStatus, logs: Vec<String>) -> Self {
        Self {
            identity,
            phase: status.phase(),
            status: Some(status),
            logs,
        }
    }
}
