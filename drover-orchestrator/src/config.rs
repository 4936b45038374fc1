//! Orchestrator configuration
//!
//! Everything the control plane needs is read once at startup and passed
//! down explicitly. Nothing below `main` touches the environment.

use drover_core::ConfigurationError;
use drover_core::domain::identity::DEFAULT_JOB_PREFIX;
use drover_core::domain::symbol::TradingSymbol;
use drover_core::domain::workload::{DEFAULT_BACKOFF_LIMIT, WorkloadConfig};
use std::collections::BTreeMap;
use std::time::Duration;

/// Label key used to select bot jobs
pub const JOB_LABEL_KEY: &str = "app";

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the control API listens on
    pub bind_addr: String,

    /// Namespace all bot jobs are created in
    pub namespace: String,

    /// Worker container image
    pub image: String,

    /// Value of the `app` label on every bot job
    pub job_label_app: String,

    /// Chat bot token handed to the worker
    pub bot_token: String,

    /// Destination chat handed to the worker
    pub chat_id: String,

    /// Registry credentials secret, `None` when the image is public
    pub image_pull_secret: Option<String>,

    /// Pod retries before the scheduler marks a job failed
    pub backoff_limit: i32,

    /// Prefix of generated job names
    pub job_prefix: String,

    /// Symbol used when a create request omits one
    pub default_symbol: TradingSymbol,

    /// Arguments placed before the symbol in the worker command line
    pub worker_args: Vec<String>,

    /// Log lines returned by the status endpoint
    pub log_tail_lines: i64,

    /// Upper bound for one control API request, scheduler calls included
    pub request_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Required: NAMESPACE, IMAGE, JOB_LABEL_APP, BOT_TOKEN, CHAT_ID
    ///
    /// Optional:
    /// - DROVER_BIND_ADDR (default: 0.0.0.0:8080)
    /// - IMAGE_PULL_SECRET (default: dockerhubcred, empty disables)
    /// - JOB_BACKOFF_LIMIT (default: 4)
    /// - JOB_NAME_PREFIX (default: bot-job-)
    /// - DEFAULT_SYMBOL (default: BTC/USDT)
    /// - WORKER_ARGS (whitespace separated, default: none)
    /// - LOG_TAIL_LINES (default: 50)
    /// - REQUEST_TIMEOUT (seconds, default: 30)
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::Missing(key))
        };

        let namespace = required("NAMESPACE")?;
        let image = required("IMAGE")?;
        let job_label_app = required("JOB_LABEL_APP")?;
        let bot_token = required("BOT_TOKEN")?;
        let chat_id = required("CHAT_ID")?;

        let bind_addr = lookup("DROVER_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let image_pull_secret = match lookup("IMAGE_PULL_SECRET") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some("dockerhubcred".to_string()),
        };

        let backoff_limit = match lookup("JOB_BACKOFF_LIMIT") {
            Some(v) => v.trim().parse::<i32>().map_err(|e| {
                ConfigurationError::invalid("JOB_BACKOFF_LIMIT", e.to_string())
            })?,
            None => DEFAULT_BACKOFF_LIMIT,
        };

        let job_prefix = lookup("JOB_NAME_PREFIX").unwrap_or_else(|| DEFAULT_JOB_PREFIX.to_string());

        let default_symbol = match lookup("DEFAULT_SYMBOL") {
            Some(v) => TradingSymbol::new(&v)
                .map_err(|e| ConfigurationError::invalid("DEFAULT_SYMBOL", e.to_string()))?,
            None => TradingSymbol::default(),
        };

        let worker_args = lookup("WORKER_ARGS")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let log_tail_lines = match lookup("LOG_TAIL_LINES") {
            Some(v) => v
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigurationError::invalid("LOG_TAIL_LINES", e.to_string()))?,
            None => 50,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigurationError::invalid("REQUEST_TIMEOUT", e.to_string()))?,
            None => Duration::from_secs(30),
        };

        Ok(Self {
            bind_addr,
            namespace,
            image,
            job_label_app,
            bot_token,
            chat_id,
            image_pull_secret,
            backoff_limit,
            job_prefix,
            default_symbol,
            worker_args,
            log_tail_lines,
            request_timeout,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.backoff_limit < 0 {
            return Err(ConfigurationError::invalid(
                "JOB_BACKOFF_LIMIT",
                "must not be negative",
            ));
        }

        if self.log_tail_lines <= 0 {
            return Err(ConfigurationError::invalid(
                "LOG_TAIL_LINES",
                "must be greater than 0",
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigurationError::invalid(
                "REQUEST_TIMEOUT",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Static workload settings for the spec builder
    pub fn workload(&self) -> WorkloadConfig {
        let mut workload = WorkloadConfig::new(&self.namespace, &self.image);
        workload.image_pull_secret = self.image_pull_secret.clone();
        workload.backoff_limit = self.backoff_limit;
        workload.worker_args = self.worker_args.clone();
        workload.labels = BTreeMap::from([(
            JOB_LABEL_KEY.to_string(),
            self.job_label_app.clone(),
        )]);
        workload.env = BTreeMap::from([
            ("BOT_TOKEN".to_string(), self.bot_token.clone()),
            ("CHAT_ID".to_string(), self.chat_id.clone()),
        ]);
        workload
    }
}
