//! Candle sampling interval definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Candle sampling interval, encoded the way ISS expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// 1-minute candles.
    #[default]
    #[serde(rename = "m1")]
    Minute1,
    /// 10-minute candles.
    #[serde(rename = "m10")]
    Minute10,
    /// 1-hour candles.
    #[serde(rename = "h1")]
    Hour1,
    /// Daily candles.
    #[serde(rename = "d1")]
    Day1,
    /// Weekly candles.
    #[serde(rename = "w1")]
    Week1,
    /// Monthly candles.
    #[serde(rename = "mn1")]
    Month1,
    /// Quarterly candles.
    #[serde(rename = "q1")]
    Quarter1,
}

impl Interval {
    /// Returns the numeric code sent in the `interval` query parameter.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Minute1 => "1",
            Self::Minute10 => "10",
            Self::Hour1 => "60",
            Self::Day1 => "24",
            Self::Week1 => "7",
            Self::Month1 => "31",
            Self::Quarter1 => "4",
        }
    }

    /// Returns the interval as a short human identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "m1",
            Self::Minute10 => "m10",
            Self::Hour1 => "h1",
            Self::Day1 => "d1",
            Self::Week1 => "w1",
            Self::Month1 => "mn1",
            Self::Quarter1 => "q1",
        }
    }

    /// Returns all available intervals.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minute1,
            Self::Minute10,
            Self::Hour1,
            Self::Day1,
            Self::Week1,
            Self::Month1,
            Self::Quarter1,
        ]
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "m1" | "1m" | "minute" => Ok(Self::Minute1),
            "10" | "m10" | "10m" => Ok(Self::Minute10),
            "60" | "h1" | "1h" | "hour" => Ok(Self::Hour1),
            "24" | "d1" | "1d" | "day" | "daily" => Ok(Self::Day1),
            "7" | "w1" | "1w" | "week" | "weekly" => Ok(Self::Week1),
            "31" | "mn1" | "month" | "monthly" => Ok(Self::Month1),
            "4" | "q1" | "quarter" | "quarterly" => Ok(Self::Quarter1),
            _ => Err(IntervalParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid interval string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid interval '{}', expected one of: 1, 10, 60, 24, 7, 31, 4 (or m1, m10, h1, d1, w1, mn1, q1)",
            self.0
        )
    }
}

impl std::error::Error for IntervalParseError {}
