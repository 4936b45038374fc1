//! Bot API endpoints

use crate::DroverClient;
use crate::error::{ClientError, Result};
use drover_core::dto::bot::{BotCreated, BotStatus, BotStopped, BotSummary, CreateBot};

impl DroverClient {
    /// Start a bot. Without a symbol the orchestrator picks its default pair.
    pub async fn create_bot(&self, symbol: Option<String>) -> Result<BotCreated> {
        let url = format!("{}/bots/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateBot { symbol })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get scheduler status and recent logs of a bot
    pub async fn get_bot(&self, job_name: &str) -> Result<BotStatus> {
        let url = format!("{}/bots/{}", self.base_url, job_name);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Stop a bot
    pub async fn stop_bot(&self, job_name: &str) -> Result<BotStopped> {
        let url = format!("{}/bots/{}", self.base_url, job_name);
        let response = self.client.delete(&url).send().await?;

        self.handle_response(response).await
    }

    /// List bots known to the scheduler
    pub async fn list_bots(&self) -> Result<Vec<BotSummary>> {
        let url = format!("{}/bots", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Check that the orchestrator is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(status.as_u16(), "Health check failed"));
        }

        Ok(())
    }
}
