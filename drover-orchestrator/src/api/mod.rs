//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles endpoints for a specific domain.

pub mod bots;
pub mod error;
pub mod health;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use drover_core::domain::symbol::TradingSymbol;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::service::BotService;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub bots: Arc<BotService>,
    pub default_symbol: TradingSymbol,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Bot endpoints
        .route("/bots", get(bots::list_bots).post(bots::create_bot))
        .route("/bots/", post(bots::create_bot))
        .route(
            "/bots/{job_name}",
            get(bots::get_bot).delete(bots::stop_bot),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
