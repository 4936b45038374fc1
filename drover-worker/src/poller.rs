//! Price poller
//!
//! Announces itself once, then fetches and reports the price on every tick.
//! A failed fetch or send is logged and the next tick tries again.

use drover_core::domain::symbol::TradingSymbol;
use std::sync::Arc;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::feed::{FeedError, PriceSource, Quote};
use crate::notifier::Notifier;

pub struct PricePoller {
    symbol: TradingSymbol,
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl PricePoller {
    pub fn new(
        symbol: TradingSymbol,
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
    ) -> Self {
        Self {
            symbol,
            source,
            notifier,
            interval,
        }
    }

    /// Runs until the task is dropped
    pub async fn run(&self) {
        info!(
            "Starting price poller for {} (interval: {:?})",
            self.symbol, self.interval
        );

        self.announce().await;

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = self.poll_once().await {
                error!("Failed to fetch price for {}: {}", self.symbol, e);
            }
        }
    }

    /// Sends the start message
    pub async fn announce(&self) {
        self.notify(&format!("Starting price fetch for {}.", self.symbol))
            .await;
    }

    /// One fetch-and-report cycle
    pub async fn poll_once(&self) -> Result<Quote, FeedError> {
        debug!("Fetching price for {}", self.symbol);

        let quote = self.source.fetch(&self.symbol).await?;

        info!("Fetched price {} for {}", quote.price, quote.symbol);
        self.notify(&format_quote(&quote)).await;

        Ok(quote)
    }

    async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            error!("Failed to send message: {}", e);
        }
    }
}

fn format_quote(quote: &Quote) -> String {
    format!(
        "Fetched price from exchange: {} - {} at {}",
        quote.symbol,
        quote.price.normalize(),
        quote.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NotifyError;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Mutex;

    struct FixedSource {
        price: Option<Decimal>,
    }

    #[async_trait]
    impl PriceSource for FixedSource {
        async fn fetch(&self, symbol: &TradingSymbol) -> Result<Quote, FeedError> {
            match self.price {
                Some(price) => Ok(Quote {
                    symbol: symbol.clone(),
                    price,
                    timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap(),
                }),
                None => Err(FeedError::Status {
                    status: 503,
                    body: "maintenance".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Rejected {
                    status: 401,
                    body: "Unauthorized".to_string(),
                });
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn poller(price: Option<&str>, notifier: Arc<RecordingNotifier>) -> PricePoller {
        let source = FixedSource {
            price: price.map(|p| Decimal::from_str(p).unwrap()),
        };
        PricePoller::new(
            TradingSymbol::default(),
            Arc::new(source),
            notifier,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_announce() {
        let notifier = Arc::new(RecordingNotifier::default());
        poller(None, notifier.clone()).announce().await;

        assert_eq!(
            *notifier.sent.lock().unwrap(),
            vec!["Starting price fetch for BTC/USDT.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_poll_once_reports_price() {
        let notifier = Arc::new(RecordingNotifier::default());
        let quote = poller(Some("67012.50000000"), notifier.clone())
            .poll_once()
            .await
            .unwrap();

        assert_eq!(quote.price, Decimal::from_str("67012.5").unwrap());
        assert_eq!(
            *notifier.sent.lock().unwrap(),
            vec!["Fetched price from exchange: BTC/USDT - 67012.5 at 2024-03-01 12:30:05 UTC".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let result = poller(None, notifier.clone()).poll_once().await;

        assert!(result.is_err());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_not_fatal() {
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..RecordingNotifier::default()
        });
        let result = poller(Some("1.0"), notifier).poll_once().await;
        assert!(result.is_ok());
    }
}
