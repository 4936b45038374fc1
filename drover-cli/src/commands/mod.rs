//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod bot;

pub use bot::BotCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bot management
    Bot {
        #[command(subcommand)]
        command: BotCommands,
    },
    /// Check that the orchestrator is reachable
    Health,
}

/// Routes the command to the appropriate handler module
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Bot { command } => bot::handle_bot_command(command, config).await,
        Commands::Health => check_health(config).await,
    }
}

async fn check_health(config: &Config) -> Result<()> {
    let client = config.client()?;
    client.health().await?;

    println!(
        "{} Orchestrator at {} is healthy",
        "✓".green(),
        client.base_url().cyan()
    );
    Ok(())
}
