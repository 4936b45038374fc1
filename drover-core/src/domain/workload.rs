//! Workload spec builder
//!
//! Turns a job identity, a trading symbol and the static launcher configuration
//! into a declarative description of one bot job. Building a spec is pure: no
//! network, no disk, no environment lookups.

use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::domain::identity::JobIdentity;
use crate::domain::symbol::TradingSymbol;
use crate::error::ConfigurationError;

/// Annotation carrying the raw symbol (label values cannot hold `/`)
pub const SYMBOL_ANNOTATION: &str = "drover.io/symbol";

/// Scheduler retries of the pod before the job is marked failed
pub const DEFAULT_BACKOFF_LIMIT: i32 = 4;

/// Name of the single container in every bot pod
pub const DEFAULT_CONTAINER_NAME: &str = "bot";

/// Static workload configuration shared by every bot job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadConfig {
    pub namespace: String,
    pub image: String,
    pub image_pull_policy: String,
    /// Registry credentials secret, `None` for public images
    pub image_pull_secret: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub backoff_limit: i32,
    pub container_name: String,
    /// Arguments placed before the symbol
    pub worker_args: Vec<String>,
    /// Environment handed to the worker (notification credentials)
    pub env: BTreeMap<String, String>,
}

impl WorkloadConfig {
    pub fn new(namespace: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            image: image.into(),
            image_pull_policy: "Always".to_string(),
            image_pull_secret: None,
            labels: BTreeMap::new(),
            backoff_limit: DEFAULT_BACKOFF_LIMIT,
            container_name: DEFAULT_CONTAINER_NAME.to_string(),
            worker_args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Label selector matching every job built from this config
    pub fn label_selector(&self) -> String {
        self.labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Pod restart policy. Bots only ever use `Never`: a crashed pod surfaces as a
/// job failure and the job-level backoff limit decides whether to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    Never,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartPolicy::Never => "Never",
        }
    }
}

/// The single container of a bot pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub image_pull_policy: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// Immutable description of one bot job, ready for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub name: JobIdentity,
    pub namespace: String,
    pub symbol: TradingSymbol,
    pub labels: BTreeMap<String, String>,
    pub container: ContainerSpec,
    pub restart_policy: RestartPolicy,
    pub backoff_limit: i32,
    pub image_pull_secret: Option<String>,
}

/// Builds the spec for one bot job
pub fn build_spec(
    identity: &JobIdentity,
    symbol: &TradingSymbol,
    config: &WorkloadConfig,
) -> Result<WorkloadSpec, ConfigurationError> {
    if config.image.trim().is_empty() {
        return Err(ConfigurationError::Missing("IMAGE"));
    }
    if config.namespace.trim().is_empty() {
        return Err(ConfigurationError::Missing("NAMESPACE"));
    }
    if config.backoff_limit < 0 {
        return Err(ConfigurationError::invalid(
            "JOB_BACKOFF_LIMIT",
            format!("must not be negative (got {})", config.backoff_limit),
        ));
    }

    let mut args = config.worker_args.clone();
    args.push(symbol.to_string());

    Ok(WorkloadSpec {
        name: identity.clone(),
        namespace: config.namespace.clone(),
        symbol: symbol.clone(),
        labels: config.labels.clone(),
        container: ContainerSpec {
            name: config.container_name.clone(),
            image: config.image.clone(),
            image_pull_policy: config.image_pull_policy.clone(),
            args,
            env: config.env.clone(),
        },
        restart_policy: RestartPolicy::Never,
        backoff_limit: config.backoff_limit,
        image_pull_secret: config
            .image_pull_secret
            .clone()
            .filter(|s| !s.trim().is_empty()),
    })
}

impl WorkloadSpec {
    /// Renders the `batch/v1` Job manifest
    pub fn to_manifest(&self) -> Value {
        let env: Vec<Value> = self
            .container
            .env
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect();

        let mut pod_spec = json!({
            "restartPolicy": self.restart_policy.as_str(),
            "containers": [{
                "name": self.container.name,
                "image": self.container.image,
                "imagePullPolicy": self.container.image_pull_policy,
                "args": self.container.args,
                "env": env,
            }],
        });
        if let Some(secret) = &self.image_pull_secret {
            pod_spec["imagePullSecrets"] = json!([{ "name": secret }]);
        }

        json!({
            "apiVersion": "batch/v1",
            "kind": "Job",
            "metadata": {
                "name": self.name.as_str(),
                "namespace": self.namespace,
                "labels": self.labels,
                "annotations": { SYMBOL_ANNOTATION: self.symbol.as_str() },
            },
            "spec": {
                "backoffLimit": self.backoff_limit,
                "template": {
                    "metadata": { "labels": self.labels },
                    "spec": pod_spec,
                },
            },
        })
    }
}
