use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod orchestration;
pub mod service;

use crate::api::AppState;
use crate::config::Config;
use crate::orchestration::KubernetesBackend;
use crate::service::BotService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drover_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Drover Orchestrator...");

    // A missing .env file is fine, the environment may already be populated
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Loaded configuration: namespace={}, image={}, label app={}",
        config.namespace,
        config.image,
        config.job_label_app
    );

    let backend = KubernetesBackend::connect(&config.namespace, config.request_timeout).await?;

    tracing::info!("Kubernetes client initialized");

    let bots = BotService::new(
        Arc::new(backend),
        config.workload(),
        &config.job_prefix,
        config.log_tail_lines,
    );

    let state = AppState {
        bots: Arc::new(bots),
        default_symbol: config.default_symbol.clone(),
    };

    // Build router with all API endpoints
    let app = api::create_router(state, config.request_timeout);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Drover Orchestrator stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
