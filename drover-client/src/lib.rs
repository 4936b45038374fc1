//! Drover HTTP Client
//!
//! Typed client for the orchestrator's bot API, used by the CLI.
//!
//! # Example
//!
//! ```no_run
//! use drover_client::DroverClient;
//!
//! #[tokio::main]
//! async fn main() -> drover_client::Result<()> {
//!     let client = DroverClient::new("http://localhost:8080");
//!
//!     let created = client.create_bot(Some("ETH/USDT".to_string())).await?;
//!     println!("Started {}", created.job_name);
//!     Ok(())
//! }
//! ```

mod bots;
pub mod error;

pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Drover orchestrator API
#[derive(Debug, Clone)]
pub struct DroverClient {
    /// Base URL of the orchestrator (e.g., "http://localhost:8080")
    base_url: String,
    client: Client,
}

impl DroverClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client around a preconfigured reqwest Client (timeouts, proxies, TLS)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::status(
                status.as_u16(),
                error_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("Failed to parse JSON response: {}", e)))
    }
}

/// The orchestrator answers failures with `{"error": "..."}`; fall back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
