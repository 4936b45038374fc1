//! Price feed
//!
//! Market data source for the worker. The only implementation talks to the
//! Binance public REST API; the trait keeps the poll loop testable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drover_core::domain::symbol::TradingSymbol;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// A last-traded price observation
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: TradingSymbol,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("exchange returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected ticker payload: {0}")]
    Parse(String),
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, symbol: &TradingSymbol) -> Result<Quote, FeedError>;
}

/// 24h rolling ticker, only the fields the worker reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    #[serde(with = "rust_decimal::serde::str")]
    last_price: Decimal,
    close_time: i64,
}

pub struct BinanceSource {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    async fn fetch(&self, symbol: &TradingSymbol) -> Result<Quote, FeedError> {
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.exchange_pair())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let ticker: Ticker = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let timestamp = DateTime::from_timestamp_millis(ticker.close_time)
            .ok_or_else(|| FeedError::Parse(format!("closeTime {} out of range", ticker.close_time)))?;

        Ok(Quote {
            symbol: symbol.clone(),
            price: ticker.last_price,
            timestamp,
        })
    }
}
