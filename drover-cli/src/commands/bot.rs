//! Bot command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use drover_client::DroverClient;
use drover_core::domain::job::{JobPhase, JobStatus};
use drover_core::dto::bot::{BotStatus, BotSummary};

use crate::config::Config;

/// Bot subcommands
#[derive(Subcommand)]
pub enum BotCommands {
    /// Start a new bot
    Start {
        /// Trading pair to follow (orchestrator default when omitted)
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// Show scheduler status and recent logs of a bot
    Status {
        /// Job name returned by `bot start`
        name: String,
    },
    /// Stop a bot
    Stop {
        /// Job name returned by `bot start`
        name: String,
    },
    /// List running bots
    List,
}

pub async fn handle_bot_command(command: BotCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        BotCommands::Start { symbol } => start_bot(&client, symbol).await,
        BotCommands::Status { name } => show_bot(&client, &name).await,
        BotCommands::Stop { name } => stop_bot(&client, &name).await,
        BotCommands::List => list_bots(&client).await,
    }
}

async fn start_bot(client: &DroverClient, symbol: Option<String>) -> Result<()> {
    let created = client
        .create_bot(symbol)
        .await
        .context("Failed to start bot")?;

    println!("{} {}", "✓".green(), created.message);
    println!("  Job: {}", created.job_name.cyan());
    println!();
    println!(
        "{}",
        format!("Check it with: drover bot status {}", created.job_name).dimmed()
    );

    Ok(())
}

async fn show_bot(client: &DroverClient, name: &str) -> Result<()> {
    let status = client.get_bot(name).await?;
    print_bot_details(&status);
    Ok(())
}

async fn stop_bot(client: &DroverClient, name: &str) -> Result<()> {
    let stopped = client.stop_bot(name).await.context("Failed to stop bot")?;
    println!("{} {}", "✓".green(), stopped.message);
    Ok(())
}

async fn list_bots(client: &DroverClient) -> Result<()> {
    let bots = client.list_bots().await?;

    if bots.is_empty() {
        println!("{}", "No bots found.".yellow());
    } else {
        println!("{}", format!("Found {} bot(s):", bots.len()).bold());
        println!();
        for bot in &bots {
            print_bot_summary(bot);
        }
    }

    Ok(())
}

fn print_bot_summary(bot: &BotSummary) {
    println!("  {} {}", "▸".cyan(), bot.job_name);
    println!("    Symbol: {}", bot.symbol.as_deref().unwrap_or("-").dimmed());
    println!("    Phase:  {}", colorize_phase(bot.phase));
    println!();
}

fn print_bot_details(bot: &BotStatus) {
    println!("{}", "Bot Details:".bold());
    println!("  Job:    {}", bot.job_name.cyan());
    println!("  Phase:  {}", colorize_phase(bot.status));

    if let Some(details) = &bot.details {
        print_job_status(details);
    }

    println!("\n{}", "Recent logs:".bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", bot.logs);
    println!("{}", "─".repeat(80).dimmed());
}

fn print_job_status(status: &JobStatus) {
    println!(
        "  Pods:   {} active, {} succeeded, {} failed",
        status.active.unwrap_or(0),
        status.succeeded.unwrap_or(0),
        status.failed.unwrap_or(0)
    );

    if let Some(started) = status.start_time {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(completed) = status.completion_time {
        println!("  Completed: {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }

    for condition in &status.conditions {
        println!(
            "  {} {}={} {}",
            "•".dimmed(),
            condition.condition_type,
            condition.status,
            condition.message.as_deref().unwrap_or("").dimmed()
        );
    }
}

fn colorize_phase(phase: JobPhase) -> ColoredString {
    let phase_str = phase.to_string();
    match phase {
        JobPhase::Submitted => phase_str.yellow(),
        JobPhase::Running => phase_str.cyan(),
        JobPhase::Succeeded => phase_str.green(),
        JobPhase::Failed => phase_str.red(),
        JobPhase::Unknown => phase_str.dimmed(),
    }
}
