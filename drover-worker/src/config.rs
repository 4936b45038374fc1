//! Worker configuration
//!
//! The symbol arrives as the single positional argument (that is how the
//! orchestrator launches the container); credentials come from the environment.

use clap::Parser;
use drover_core::domain::symbol::{DEFAULT_SYMBOL, TradingSymbol};
use std::time::Duration;

/// Price feed worker configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "drover-worker")]
#[command(about = "Polls an exchange price and posts it to a chat", long_about = None)]
pub struct Config {
    /// Instrument pair to follow
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: TradingSymbol,

    /// Chat bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Destination chat id
    #[arg(long, env = "CHAT_ID")]
    pub chat_id: String,

    /// Seconds between two price fetches
    #[arg(long, env = "POLL_INTERVAL", default_value_t = 5)]
    pub poll_interval_secs: u64,

    /// Exchange REST base URL
    #[arg(long, env = "EXCHANGE_API_URL", default_value = "https://api.binance.com")]
    pub exchange_url: String,

    /// Chat bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = "https://api.telegram.org")]
    pub telegram_url: String,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN cannot be empty");
        }

        if self.chat_id.trim().is_empty() {
            anyhow::bail!("CHAT_ID cannot be empty");
        }

        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        for url in [&self.exchange_url, &self.telegram_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", url);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["drover-worker", "--bot-token", "123:abc", "--chat-id", "42"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_symbol() {
        let config = parse(&[]);
        assert_eq!(config.symbol.as_str(), "BTC/USDT");
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_positional_symbol() {
        let config = parse(&["ETH/USDT"]);
        assert_eq!(config.symbol.as_str(), "ETH/USDT");
    }

    #[test]
    fn test_validation() {
        let mut config = parse(&[]);
        config.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = parse(&[]);
        config.exchange_url = "api.binance.com".to_string();
        assert!(config.validate().is_err());

        let mut config = parse(&[]);
        config.chat_id = " ".to_string();
        assert!(config.validate().is_err());
    }
}
