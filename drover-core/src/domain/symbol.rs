//! Trading symbol

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbol used when the caller does not supply one
pub const DEFAULT_SYMBOL: &str = "BTC/USDT";

/// Instrument pair such as `BTC/USDT`
///
/// Only presence is checked. Whether the exchange knows the pair is discovered
/// by the worker at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingSymbol(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("trading symbol is empty")]
pub struct EmptySymbol;

impl TradingSymbol {
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, EmptySymbol> {
        let trimmed = symbol.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptySymbol);
        }
        Ok(TradingSymbol(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange form of the pair: separators removed, uppercased (`BTC/USDT` -> `BTCUSDT`)
    pub fn exchange_pair(&self) -> String {
        self.0
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }
}

impl Default for TradingSymbol {
    fn default() -> Self {
        TradingSymbol(DEFAULT_SYMBOL.to_string())
    }
}

impl fmt::Display for TradingSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TradingSymbol {
    type Err = EmptySymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TradingSymbol::new(s)
    }
}

impl TryFrom<String> for TradingSymbol {
    type Error = EmptySymbol;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TradingSymbol::new(value)
    }
}

impl From<TradingSymbol> for String {
    fn from(symbol: TradingSymbol) -> Self {
        symbol.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbol() {
        assert_eq!(TradingSymbol::default().as_str(), "BTC/USDT");
    }

    #[test]
    fn test_symbol_is_trimmed() {
        let symbol = TradingSymbol::new("  ETH/USDT ").unwrap();
        assert_eq!(symbol.as_str(), "ETH/USDT");
    }

    #[test]
    fn test_blank_symbol_rejected() {
        assert_eq!(TradingSymbol::new(""), Err(EmptySymbol));
        assert_eq!(TradingSymbol::new("   "), Err(EmptySymbol));
    }

    #[test]
    fn test_exchange_pair() {
        assert_eq!(TradingSymbol::default().exchange_pair(), "BTCUSDT");
        assert_eq!(
            "sol/usdc".parse::<TradingSymbol>().unwrap().exchange_pair(),
            "SOLUSDC"
        );
    }
}
