//! Bot API Handlers
//!
//! HTTP endpoints for starting, inspecting and stopping bots.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use drover_core::domain::identity::JobIdentity;
use drover_core::domain::symbol::TradingSymbol;
use drover_core::dto::bot::{BotCreated, BotStatus, BotStopped, BotSummary, CreateBot};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::DeleteOutcome;

/// Returned in place of logs when the scheduler has none to show
const NO_LOGS: &str = "No logs available";

/// POST /bots/
/// Start a new bot. The body is optional; without a symbol the default pair is used.
pub async fn create_bot(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<BotCreated>> {
    let req = parse_create_request(&body)?;

    let symbol = match req.symbol {
        Some(raw) => TradingSymbol::new(&raw).map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => state.default_symbol.clone(),
    };

    tracing::info!("Starting bot for symbol: {}", symbol);

    let (identity, status) = state.bots.create(&symbol).await?;

    Ok(Json(BotCreated {
        message: format!("Starting bot: {}", identity),
        job_name: identity.into_string(),
        status,
    }))
}

/// GET /bots/{job_name}
/// Scheduler status and recent logs of a bot
pub async fn get_bot(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
) -> ApiResult<Json<BotStatus>> {
    let identity = parse_job_name(&job_name)?;

    tracing::debug!("Getting bot: {}", identity);

    let report = state.bots.status(&identity).await?;

    let logs = if report.logs.is_empty() {
        NO_LOGS.to_string()
    } else {
        report.logs.join("\n")
    };

    Ok(Json(BotStatus {
        job_name: report.identity.into_string(),
        status: report.phase,
        details: report.status,
        logs,
    }))
}

/// DELETE /bots/{job_name}
/// Stop a bot. Succeeds whether or not the job still existed.
pub async fn stop_bot(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
) -> ApiResult<Json<BotStopped>> {
    let identity = parse_job_name(&job_name)?;

    tracing::info!("Stopping bot: {}", identity);

    match state.bots.delete(&identity).await {
        DeleteOutcome::Deleted | DeleteOutcome::AlreadyGone => {}
        DeleteOutcome::Unconfirmed(reason) => {
            tracing::warn!("Reporting {} as stopped without confirmation: {}", identity, reason);
        }
    }

    Ok(Json(BotStopped {
        message: format!("Stopped bot: {}", identity),
    }))
}

/// GET /bots
/// List bots known to the scheduler
pub async fn list_bots(State(state): State<AppState>) -> ApiResult<Json<Vec<BotSummary>>> {
    tracing::debug!("Listing bots");

    let bots = state.bots.list().await?;
    Ok(Json(bots))
}

// =============================================================================
// Request validation
// =============================================================================

fn parse_create_request(body: &[u8]) -> Result<CreateBot, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateBot::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

fn parse_job_name(job_name: &str) -> Result<JobIdentity, ApiError> {
    JobIdentity::parse(job_name)
        .map_err(|e| ApiError::BadRequest(format!("Invalid job name '{}': {}", job_name, e)))
}
