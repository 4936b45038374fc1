//! Drover Worker
//!
//! Runs inside every bot job. Follows one trading symbol, posting its last
//! price to a chat at a fixed interval until the job is deleted.

mod config;
mod feed;
mod notifier;
mod poller;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::feed::BinanceSource;
use crate::notifier::TelegramNotifier;
use crate::poller::PricePoller;

/// Upper bound for a single exchange or chat request
const HTTP_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drover_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    info!(
        "Starting Drover Worker: symbol={}, interval={:?}",
        config.symbol,
        config.poll_interval()
    );

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")?;

    let source = BinanceSource::new(http.clone(), &config.exchange_url);
    let notifier = TelegramNotifier::new(http, &config.telegram_url, &config.bot_token, &config.chat_id);

    let poller = PricePoller::new(
        config.symbol.clone(),
        Arc::new(source),
        Arc::new(notifier),
        config.poll_interval(),
    );

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }
    }

    info!("Drover Worker stopped");

    Ok(())
}
