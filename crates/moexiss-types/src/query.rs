//! Candle query configuration.

use chrono::FixedOffset;

use crate::{ColumnSet, Interval, Market, QueryError};

/// Columns requested for every candle query, in output order.
pub const CANDLE_COLUMNS: [&str; 4] = ["begin", "open", "close", "volume"];

/// UTC offset of Moscow Exchange local time, in seconds.
pub const MOSCOW_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Returns the fixed UTC+3 offset the exchange reports timestamps in.
#[must_use]
pub const fn moscow_offset() -> FixedOffset {
    match FixedOffset::east_opt(MOSCOW_UTC_OFFSET_SECS) {
        Some(offset) => offset,
        None => unreachable!(),
    }
}

/// A fully configured request for one security's candles.
///
/// `from` and `till` are passed to the API verbatim (`YYYY-MM-DD` or
/// `YYYY-MM-DD HH:MM:SS`); an empty `till` means "up to the latest candle".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleQuery {
    market: Market,
    symbol: String,
    interval: Interval,
    from: String,
    till: String,
    utc_offset: FixedOffset,
}

impl CandleQuery {
    /// Creates a query with a one-minute interval, an open-ended range and
    /// the exchange's default time zone.
    #[must_use]
    pub fn new(market: Market, symbol: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            market,
            symbol: symbol.into(),
            interval: Interval::default(),
            from: from.into(),
            till: String::new(),
            utc_offset: moscow_offset(),
        }
    }

    /// Sets the sampling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the end of the range. An empty string leaves it open-ended.
    #[must_use]
    pub fn with_till(mut self, till: impl Into<String>) -> Self {
        self.till = till.into();
        self
    }

    /// Sets the UTC offset used to interpret `datetime` values.
    #[must_use]
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Checks that the symbol and the start of range are non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first empty field.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.symbol.trim().is_empty() {
            return Err(QueryError::EmptySymbol);
        }
        if self.from.trim().is_empty() {
            return Err(QueryError::EmptyFrom);
        }
        Ok(())
    }

    /// Returns the market kind.
    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }

    /// Returns the security symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the sampling interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the start of the range.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the end of the range (empty when open-ended).
    #[must_use]
    pub fn till(&self) -> &str {
        &self.till
    }

    /// Returns the exchange UTC offset.
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Returns the column set every candle query produces.
    #[must_use]
    pub fn columns(&self) -> ColumnSet {
        ColumnSet::new(CANDLE_COLUMNS)
    }
}

impl std::fmt::Display for CandleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} from {}",
            self.market, self.symbol, self.interval, self.from
        )?;
        if !self.till.is_empty() {
            write!(f, " till {}", self.till)?;
        }
        Ok(())
    }
}
