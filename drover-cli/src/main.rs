//! Drover CLI
//!
//! Command-line interface for starting and stopping bots through the orchestrator.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "drover")]
#[command(about = "Trading bot job CLI", long_about = None)]
struct Cli {
    /// Orchestrator URL
    #[arg(
        long,
        env = "DROVER_ORCHESTRATOR_URL",
        default_value = "http://localhost:8080"
    )]
    orchestrator_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "DROVER_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        orchestrator_url: cli.orchestrator_url,
        timeout: Duration::from_secs(cli.timeout),
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::BotCommands;

    #[test]
    fn test_parse_start_with_symbol() {
        let cli = Cli::try_parse_from([
            "drover",
            "--orchestrator-url",
            "http://orchestrator:8080",
            "bot",
            "start",
            "--symbol",
            "ETH/USDT",
        ])
        .unwrap();

        assert_eq!(cli.orchestrator_url, "http://orchestrator:8080");
        match cli.command {
            Commands::Bot {
                command: BotCommands::Start { symbol },
            } => assert_eq!(symbol.as_deref(), Some("ETH/USDT")),
            _ => panic!("expected bot start"),
        }
    }

    #[test]
    fn test_default_url_matches_orchestrator_bind_port() {
        let cli = Cli::try_parse_from(["drover", "health"]).unwrap();
        assert_eq!(cli.orchestrator_url, "http://localhost:8080");
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_parse_stop_requires_name() {
        assert!(Cli::try_parse_from(["drover", "bot", "stop"]).is_err());
        assert!(Cli::try_parse_from(["drover", "bot", "stop", "bot-job-1"]).is_ok());
    }
}
