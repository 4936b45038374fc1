//! Kubernetes backend
//!
//! Bot jobs are plain `batch/v1` Jobs. The manifest comes from the spec
//! builder and is handed to the API server as-is.

use anyhow::Context;
use async_trait::async_trait;
use drover_core::domain::identity::JobIdentity;
use drover_core::domain::job::JobStatus;
use drover_core::domain::workload::{SYMBOL_ANNOTATION, WorkloadSpec};
use drover_core::dto::bot::BotSummary;
use k8s_openapi::api::batch::v1::{Job, JobStatus as KubeJobStatus};
use k8s_openapi::api::core::v1::Pod;
use kube::Client;
use kube::api::{Api, DeleteParams, ListParams, LogParams, PostParams, PropagationPolicy};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{ErrorKind, Operation, OrchestrationBackend, OrchestrationError};

/// Label the Job controller puts on every pod it creates
const JOB_NAME_LABEL: &str = "job-name";

/// Scheduler backend talking to a Kubernetes API server
#[derive(Clone)]
pub struct KubernetesBackend {
    client: Client,
    namespace: String,
}

impl KubernetesBackend {
    /// Creates a backend from an existing client
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    /// Connects using the in-cluster service account or the local kubeconfig
    ///
    /// `timeout` bounds connecting and reading so a partitioned API server
    /// cannot hang a request forever.
    pub async fn connect(namespace: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let mut config = kube::Config::infer()
            .await
            .context("Failed to load Kubernetes configuration")?;
        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);

        info!("Using Kubernetes API server at {}", config.cluster_url);

        let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
        Ok(Self::new(client, namespace))
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn pods(&self) -> Api<Pod> {
        Api::namespaced(self.client.clone(), &self.namespace)
    }
}

#[async_trait]
impl OrchestrationBackend for KubernetesBackend {
    async fn submit(&self, spec: &WorkloadSpec) -> Result<JobStatus, OrchestrationError> {
        let job: Job = serde_json::from_value(spec.to_manifest()).map_err(|e| {
            OrchestrationError::new(
                Operation::Submit,
                Some(&spec.name),
                ErrorKind::Invalid,
                format!("manifest does not describe a Job: {}", e),
            )
        })?;

        let created = self
            .jobs(&spec.namespace)
            .create(&PostParams::default(), &job)
            .await
            .map_err(|e| classify(Operation::Submit, Some(&spec.name), e))?;

        debug!("Job {} accepted in namespace {}", spec.name, spec.namespace);

        Ok(convert_status(&spec.name, created.status))
    }

    async fn delete(&self, identity: &JobIdentity) -> Result<(), OrchestrationError> {
        let params = DeleteParams {
            grace_period_seconds: Some(0),
            propagation_policy: Some(PropagationPolicy::Foreground),
            ..DeleteParams::default()
        };

        self.jobs(&self.namespace)
            .delete(identity.as_str(), &params)
            .await
            .map_err(|e| classify(Operation::Delete, Some(identity), e))?;

        Ok(())
    }

    async fn query_status(&self, identity: &JobIdentity) -> Result<JobStatus, OrchestrationError> {
        let job = self
            .jobs(&self.namespace)
            .get(identity.as_str())
            .await
            .map_err(|e| classify(Operation::QueryStatus, Some(identity), e))?;

        Ok(convert_status(identity, job.status))
    }

    async fn recent_logs(
        &self,
        identity: &JobIdentity,
        tail_lines: i64,
    ) -> Result<Vec<String>, OrchestrationError> {
        let selector = format!("{}={}", JOB_NAME_LABEL, identity);
        let pods = self
            .pods()
            .list(&ListParams::default().labels(&selector))
            .await
            .map_err(|e| classify(Operation::FetchLogs, Some(identity), e))?;

        let Some(pod_name) = current_pod(pods.items) else {
            debug!("No pods yet for job {}", identity);
            return Ok(Vec::new());
        };

        let params = LogParams {
            tail_lines: Some(tail_lines),
            ..LogParams::default()
        };
        let logs = self
            .pods()
            .logs(&pod_name, &params)
            .await
            .map_err(|e| classify(Operation::FetchLogs, Some(identity), e))?;

        Ok(logs.lines().map(str::to_string).collect())
    }

    async fn list(&self, label_selector: &str) -> Result<Vec<BotSummary>, OrchestrationError> {
        let jobs = self
            .jobs(&self.namespace)
            .list(&ListParams::default().labels(label_selector))
            .await
            .map_err(|e| classify(Operation::List, None, e))?;

        let summaries = jobs
            .items
            .into_iter()
            .filter_map(|job| {
                let name = job.metadata.name?;
                let symbol = job
                    .metadata
                    .annotations
                    .as_ref()
                    .and_then(|a| a.get(SYMBOL_ANNOTATION).cloned());
                let phase = match JobIdentity::parse(&name) {
                    Ok(identity) => convert_status(&identity, job.status).phase(),
                    Err(_) => return None,
                };
                Some(BotSummary {
                    job_name: name,
                    symbol,
                    phase,
                })
            })
            .collect();

        Ok(summaries)
    }
}

/// Name of the job's most recently created pod
///
/// The API server lists pods by name and job pod names end in a random
/// suffix, so list order says nothing about which retry is current.
fn current_pod(pods: Vec<Pod>) -> Option<String> {
    pods.into_iter()
        .filter(|pod| pod.metadata.name.is_some())
        .max_by_key(|pod| pod.metadata.creation_timestamp.clone())
        .and_then(|pod| pod.metadata.name)
}

/// Maps a client error onto the scheduler-agnostic taxonomy
fn classify(
    operation: Operation,
    identity: Option<&JobIdentity>,
    err: kube::Error,
) -> OrchestrationError {
    let kind = match &err {
        kube::Error::Api(response) => match response.code {
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            401 | 403 => ErrorKind::Forbidden,
            400 | 422 => ErrorKind::Invalid,
            _ => ErrorKind::Unavailable,
        },
        _ => ErrorKind::Unavailable,
    };

    debug!("Kubernetes {} call failed ({:?}): {}", operation, kind, err);

    OrchestrationError::new(operation, identity, kind, err.to_string())
}

/// Re-reads the API status block as the domain status (same field names)
fn convert_status(identity: &JobIdentity, status: Option<KubeJobStatus>) -> JobStatus {
    let Some(status) = status else {
        return JobStatus::default();
    };

    match serde_json::to_value(status).and_then(serde_json::from_value) {
        Ok(converted) => converted,
        Err(e) => {
            warn!("Unreadable status for job {}: {}", identity, e);
            JobStatus::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drover_core::domain::job::JobPhase;
    use drover_core::domain::symbol::TradingSymbol;
    use drover_core::domain::workload::{WorkloadConfig, build_spec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
    use k8s_openapi::chrono::{TimeZone, Utc};
    use kube::core::ErrorResponse;

    fn pod(name: &str, minute: u32) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                creation_timestamp: Some(Time(
                    Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap(),
                )),
                ..ObjectMeta::default()
            },
            ..Pod::default()
        }
    }

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: "rejected".to_string(),
            reason: "Test".to_string(),
            code,
        })
    }

    #[test]
    fn test_manifest_deserializes_as_job() {
        let mut config = WorkloadConfig::new("bots", "registry.example/bot:1");
        config.image_pull_secret = Some("dockerhubcred".to_string());
        config.labels.insert("app".to_string(), "bot".to_string());
        config.env.insert("CHAT_ID".to_string(), "42".to_string());

        let identity = JobIdentity::parse("bot-job-abc").unwrap();
        let spec = build_spec(&identity, &TradingSymbol::default(), &config).unwrap();
        let job: Job = serde_json::from_value(spec.to_manifest()).unwrap();

        assert_eq!(job.metadata.name.as_deref(), Some("bot-job-abc"));
        let job_spec = job.spec.unwrap();
        assert_eq!(job_spec.backoff_limit, Some(4));

        let pod_spec = job_spec.template.spec.unwrap();
        assert_eq!(pod_spec.restart_policy.as_deref(), Some("Never"));
        assert_eq!(pod_spec.containers.len(), 1);
        assert_eq!(
            pod_spec.containers[0].args,
            Some(vec!["BTC/USDT".to_string()])
        );
        assert_eq!(pod_spec.image_pull_secrets.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_convert_status() {
        let identity = JobIdentity::parse("bot-job-abc").unwrap();
        assert_eq!(convert_status(&identity, None), JobStatus::default());

        let status = KubeJobStatus {
            active: Some(1),
            ..KubeJobStatus::default()
        };
        let converted = convert_status(&identity, Some(status));
        assert_eq!(converted.active, Some(1));
        assert_eq!(converted.phase(), JobPhase::Running);
    }

    #[test]
    fn test_current_pod_is_newest() {
        // First attempt sorts after the retry by name
        let failed = pod("bot-job-abc-zzzzz", 0);
        let retry = pod("bot-job-abc-aaaaa", 5);

        assert_eq!(
            current_pod(vec![retry.clone(), failed.clone()]).as_deref(),
            Some("bot-job-abc-aaaaa")
        );
        assert_eq!(
            current_pod(vec![failed, retry]).as_deref(),
            Some("bot-job-abc-aaaaa")
        );
        assert_eq!(current_pod(Vec::new()), None);
    }

    #[test]
    fn test_classify_status_codes() {
        let identity = JobIdentity::parse("bot-job-abc").unwrap();
        let kind = |err| classify(Operation::Delete, Some(&identity), err).kind;

        assert_eq!(kind(api_error(404)), ErrorKind::NotFound);
        assert_eq!(kind(api_error(409)), ErrorKind::Conflict);
        assert_eq!(kind(api_error(401)), ErrorKind::Forbidden);
        assert_eq!(kind(api_error(403)), ErrorKind::Forbidden);
        assert_eq!(kind(api_error(400)), ErrorKind::Invalid);
        assert_eq!(kind(api_error(422)), ErrorKind::Invalid);
        assert_eq!(kind(api_error(500)), ErrorKind::Unavailable);
        assert_eq!(
            kind(kube::Error::Service("connection refused".into())),
            ErrorKind::Unavailable
        );

        let err = classify(Operation::Delete, Some(&identity), api_error(404));
        assert!(err.is_not_found());
        assert_eq!(err.identity, Some(identity.clone()));
    }
}
