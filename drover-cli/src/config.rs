//! CLI configuration

use anyhow::{Context, Result};
use drover_client::DroverClient;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the orchestrator service
    pub orchestrator_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Client for the configured orchestrator
    pub fn client(&self) -> Result<DroverClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(DroverClient::with_client(&self.orchestrator_url, http))
    }
}
