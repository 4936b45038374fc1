//! In-memory backend for tests

use async_trait::async_trait;
use drover_core::domain::identity::JobIdentity;
use drover_core::domain::job::JobStatus;
use drover_core::domain::workload::WorkloadSpec;
use drover_core::dto::bot::BotSummary;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ErrorKind, Operation, OrchestrationBackend, OrchestrationError};

/// Behaves like a scheduler that accepts everything, unless told to fail
#[derive(Default)]
pub struct FakeBackend {
    pub jobs: Mutex<HashMap<String, WorkloadSpec>>,
    pub fail_submit: Option<ErrorKind>,
    pub fail_delete: Option<ErrorKind>,
    pub fail_logs: bool,
    pub logs: Vec<String>,
}

impl FakeBackend {
    pub fn failing_submit(kind: ErrorKind) -> Self {
        Self {
            fail_submit: Some(kind),
            ..Self::default()
        }
    }

    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

#[async_trait]
impl OrchestrationBackend for FakeBackend {
    async fn submit(&self, spec: &WorkloadSpec) -> Result<JobStatus, OrchestrationError> {
        if let Some(kind) = self.fail_submit {
            return Err(OrchestrationError::new(
                Operation::Submit,
                Some(&spec.name),
                kind,
                "injected failure",
            ));
        }
        self.jobs
            .lock()
            .unwrap()
            .insert(spec.name.to_string(), spec.clone());
        Ok(JobStatus::default())
    }

    async fn delete(&self, identity: &JobIdentity) -> Result<(), OrchestrationError> {
        if let Some(kind) = self.fail_delete {
            return Err(OrchestrationError::new(
                Operation::Delete,
                Some(identity),
                kind,
                "injected failure",
            ));
        }
        match self.jobs.lock().unwrap().remove(identity.as_str()) {
            Some(_) => Ok(()),
            None => Err(OrchestrationError::new(
                Operation::Delete,
                Some(identity),
                ErrorKind::NotFound,
                format!("jobs.batch \"{}\" not found", identity),
            )),
        }
    }

    async fn query_status(&self, identity: &JobIdentity) -> Result<JobStatus, OrchestrationError> {
        if self.jobs.lock().unwrap().contains_key(identity.as_str()) {
            Ok(JobStatus {
                active: Some(1),
                ..JobStatus::default()
            })
        } else {
            Err(OrchestrationError::new(
                Operation::QueryStatus,
                Some(identity),
                ErrorKind::NotFound,
                "not found",
            ))
        }
    }

    async fn recent_logs(
        &self,
        identity: &JobIdentity,
        tail_lines: i64,
    ) -> Result<Vec<String>, OrchestrationError> {
        if self.fail_logs {
            return Err(OrchestrationError::new(
                Operation::FetchLogs,
                Some(identity),
                ErrorKind::Unavailable,
                "injected failure",
            ));
        }
        let skip = self.logs.len().saturating_sub(tail_lines.max(0) as usize);
        Ok(self.logs[skip..].to_vec())
    }

    async fn list(&self, _label_selector: &str) -> Result<Vec<BotSummary>, OrchestrationError> {
        let jobs = self.jobs.lock().unwrap();
        let mut summaries: Vec<BotSummary> = jobs
            .values()
            .map(|spec| BotSummary {
                job_name: spec.name.to_string(),
                symbol: Some(spec.symbol.to_string()),
                phase: JobStatus::default().phase(),
            })
            .collect();
        summaries.sort_by(|a, b| a.job_name.cmp(&b.job_name));
        Ok(summaries)
    }
}

/// Backend implementing only the required operations
pub struct MinimalBackend;

#[async_trait]
impl OrchestrationBackend for MinimalBackend {
    async fn submit(&self, _spec: &WorkloadSpec) -> Result<JobStatus, OrchestrationError> {
        Ok(JobStatus::default())
    }

    async fn delete(&self, _identity: &JobIdentity) -> Result<(), OrchestrationError> {
        Ok(())
    }
}
