//! Market kinds and their ISS endpoint templates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Market a security is traded on.
///
/// Both markets share the same candle response shape and differ only in
/// the endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Shares on the stock market.
    #[default]
    #[serde(alias = "stock")]
    Equity,
    /// Currency pairs on the SELT board.
    Currency,
}

impl Market {
    /// Returns the market as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Currency => "currency",
        }
    }

    /// Path segments that precede the symbol in the candles endpoint.
    #[must_use]
    pub const fn path_prefix(&self) -> &'static [&'static str] {
        match self {
            Self::Equity => &["engines", "stock", "markets", "shares", "securities"],
            Self::Currency => &[
                "engines",
                "currency",
                "markets",
                "selt",
                "boards",
                "cets",
                "securities",
            ],
        }
    }

    /// Returns the endpoint template with a `{symbol}` placeholder.
    ///
    /// ```
    /// use moexiss_types::Market;
    ///
    /// assert_eq!(
    ///     Market::Equity.endpoint_template(),
    ///     "/engines/stock/markets/shares/securities/{symbol}/candles.json"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint_template(&self) -> String {
        format!("/{}/{{symbol}}/candles.json", self.path_prefix().join("/"))
    }

    /// Returns all supported markets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Equity, Self::Currency]
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equity" | "stock" | "shares" => Ok(Self::Equity),
            "currency" | "fx" | "selt" => Ok(Self::Currency),
            _ => Err(MarketParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown market name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketParseError(String);

impl std::fmt::Display for MarketParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown market '{}', expected equity or currency", self.0)
    }
}

impl std::error::Error for MarketParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_template() {
        assert_eq!(
            Market::Currency.endpoint_template(),
            "/engines/currency/markets/selt/boards/cets/securities/{symbol}/candles.json"
        );
    }

    #[test]
    fn test_market_parse() {
        assert_eq!("stock".parse::<Market>().unwrap(), Market::Equity);
        assert_eq!("Currency".parse::<Market>().unwrap(), Market::Currency);
        assert!("bonds".parse::<Market>().is_err());
    }
}
