//! Bot Service
//!
//! Business logic for the bot job lifecycle:
//! `requested -> submitted -> {running, failed, succeeded} -> deleted`.
//!
//! The scheduler is the only source of truth. Nothing is cached here, so
//! concurrent calls on different bots never interact.

use drover_core::ConfigurationError;
use drover_core::domain::identity::JobIdentity;
use drover_core::domain::job::{JobReport, JobStatus};
use drover_core::domain::symbol::TradingSymbol;
use drover_core::domain::workload::{WorkloadConfig, build_spec};
use drover_core::dto::bot::BotSummary;
use std::sync::Arc;
use thiserror::Error;

use crate::orchestration::{OrchestrationBackend, OrchestrationError};

/// Service error type
#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),
}

/// Result of a stop request. Never an error: deletion is idempotent in intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The scheduler had no such job (already stopped or never existed)
    AlreadyGone,
    /// Deletion could not be confirmed; the reason has been logged
    Unconfirmed(String),
}

/// Job lifecycle manager
pub struct BotService {
    backend: Arc<dyn OrchestrationBackend>,
    workload: WorkloadConfig,
    job_prefix: String,
    log_tail_lines: i64,
}

impl BotService {
    pub fn new(
        backend: Arc<dyn OrchestrationBackend>,
        workload: WorkloadConfig,
        job_prefix: impl Into<String>,
        log_tail_lines: i64,
    ) -> Self {
        Self {
            backend,
            workload,
            job_prefix: job_prefix.into(),
            log_tail_lines,
        }
    }

    /// Launch a new bot for `symbol`
    ///
    /// Fails as a whole if the spec cannot be built or the scheduler rejects
    /// it. No identity is handed out for a failed submission.
    pub async fn create(&self, symbol: &TradingSymbol) -> Result<(JobIdentity, JobStatus), BotError> {
        let identity = JobIdentity::generate(&self.job_prefix);
        let spec = build_spec(&identity, symbol, &self.workload)?;

        let status = self.backend.submit(&spec).await.map_err(|e| {
            tracing::error!("Failed to create job {} for {}: {}", identity, symbol, e);
            e
        })?;

        tracing::info!("Job created: {} for symbol: {}", identity, symbol);

        Ok((identity, status))
    }

    /// Get the scheduler's view of a bot
    ///
    /// A backend without status support yields an `Unknown` report. Logs are
    /// advisory: failing to fetch them never fails the query.
    pub async fn status(&self, identity: &JobIdentity) -> Result<JobReport, BotError> {
        let status = match self.backend.query_status(identity).await {
            Ok(status) => status,
            Err(e) if e.is_unsupported() => {
                tracing::debug!("Status not supported by backend, reporting {} as unknown", identity);
                return Ok(JobReport::unknown(identity.clone()));
            }
            Err(e) => {
                if !e.is_not_found() {
                    tracing::error!("Failed to query job {}: {}", identity, e);
                }
                return Err(e.into());
            }
        };

        let logs = match self.backend.recent_logs(identity, self.log_tail_lines).await {
            Ok(logs) => logs,
            Err(e) if e.is_unsupported() => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to fetch logs for job {}: {}", identity, e);
                Vec::new()
            }
        };

        Ok(JobReport::from_status(identity.clone(), status, logs))
    }

    /// Stop a bot
    pub async fn delete(&self, identity: &JobIdentity) -> DeleteOutcome {
        match self.backend.delete(identity).await {
            Ok(()) => {
                tracing::info!("Job {} deleted", identity);
                DeleteOutcome::Deleted
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("Job {} already gone, nothing to delete", identity);
                DeleteOutcome::AlreadyGone
            }
            Err(e) => {
                tracing::warn!("Could not confirm deletion of job {}: {}", identity, e);
                DeleteOutcome::Unconfirmed(e.to_string())
            }
        }
    }

    /// List bots currently known to the scheduler
    pub async fn list(&self) -> Result<Vec<BotSummary>, BotError> {
        let selector = self.workload.label_selector();
        let bots = self.backend.list(&selector).await.map_err(|e| {
            tracing::error!("Failed to list jobs with selector '{}': {}", selector, e);
            e
        })?;
        Ok(bots)
    }
}
