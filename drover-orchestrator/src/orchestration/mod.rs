//! Orchestration layer
//!
//! Thin pass-through to the remote scheduler. Backends submit, delete and
//! inspect bot jobs; they never retry and never swallow a failure.
//!
//! The layer is trait-based so the lifecycle service can be tested without a
//! cluster.

mod error;
#[cfg(test)]
pub mod fake;
mod kubernetes;

pub use error::{ErrorKind, Operation, OrchestrationError};
pub use kubernetes::KubernetesBackend;

use async_trait::async_trait;
use drover_core::domain::identity::JobIdentity;
use drover_core::domain::job::JobStatus;
use drover_core::domain::workload::WorkloadSpec;
use drover_core::dto::bot::BotSummary;

/// Remote scheduler operations used by the lifecycle service
#[async_trait]
pub trait OrchestrationBackend: Send + Sync {
    /// Creates the job described by `spec`
    ///
    /// # Returns
    /// The status block the scheduler reported on creation
    async fn submit(&self, spec: &WorkloadSpec) -> Result<JobStatus, OrchestrationError>;

    /// Deletes a job and its pods (foreground propagation, no grace period)
    async fn delete(&self, identity: &JobIdentity) -> Result<(), OrchestrationError>;

    /// Current scheduler view of a job
    async fn query_status(&self, identity: &JobIdentity) -> Result<JobStatus, OrchestrationError> {
        Err(OrchestrationError::unsupported(
            Operation::QueryStatus,
            Some(identity),
        ))
    }

    /// Last `tail_lines` log lines of the job's most recent pod
    async fn recent_logs(
        &self,
        identity: &JobIdentity,
        _tail_lines: i64,
    ) -> Result<Vec<String>, OrchestrationError> {
        Err(OrchestrationError::unsupported(
            Operation::FetchLogs,
            Some(identity),
        ))
    }

    /// Jobs matching a label selector
    async fn list(&self, _label_selector: &str) -> Result<Vec<BotSummary>, OrchestrationError> {
        Err(OrchestrationError::unsupported(Operation::List, None))
    }
}
