//! Orchestration errors

use drover_core::domain::identity::JobIdentity;
use std::fmt;
use thiserror::Error;

/// Scheduler operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Delete,
    QueryStatus,
    FetchLogs,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Submit => write!(f, "submit"),
            Operation::Delete => write!(f, "delete"),
            Operation::QueryStatus => write!(f, "query status"),
            Operation::FetchLogs => write!(f, "fetch logs"),
            Operation::List => write!(f, "list"),
        }
    }
}

/// Classification of a scheduler failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    /// Request rejected as malformed
    Invalid,
    /// Network, timeout or server-side failure
    Unavailable,
    /// The backend does not implement this operation
    Unsupported,
}

/// A remote scheduler call failed
#[derive(Debug, Clone, Error)]
#[error("{operation} failed for {}: {message}", target_name(.identity))]
pub struct OrchestrationError {
    pub operation: Operation,
    pub identity: Option<JobIdentity>,
    pub kind: ErrorKind,
    pub message: String,
}

impl OrchestrationError {
    pub fn new(
        operation: Operation,
        identity: Option<&JobIdentity>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            identity: identity.cloned(),
            kind,
            message: message.into(),
        }
    }

    pub fn unsupported(operation: Operation, identity: Option<&JobIdentity>) -> Self {
        Self::new(
            operation,
            identity,
            ErrorKind::Unsupported,
            "operation not supported by this backend",
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind == ErrorKind::Unsupported
    }
}

fn target_name(identity: &Option<JobIdentity>) -> &str {
    identity
        .as_ref()
        .map(JobIdentity::as_str)
        .unwrap_or("<all jobs>")
}
