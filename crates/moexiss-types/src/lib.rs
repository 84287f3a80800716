//! Core types for the moexiss candle downloader.
//!
//! This crate provides the fundamental data structures shared by the
//! fetch, format and CLI crates:
//!
//! - [`Market`] - Market kind (equity or currency) with its ISS endpoint template
//! - [`Interval`] - Candle sampling interval
//! - [`CandleQuery`] - A fully configured candle request
//! - [`Row`] and [`ColumnSet`] - Decoded output rows and their header
//! - [`ValueType`] - Declared type of a response column

#![doc(issue_tracker_base_url = "https://github.com/moexiss/moexiss/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod interval;
mod market;
mod query;
mod row;

pub use error::QueryError;
pub use interval::{Interval, IntervalParseError};
pub use market::{Market, MarketParseError};
pub use query::{CANDLE_COLUMNS, CandleQuery, MOSCOW_UTC_OFFSET_SECS, moscow_offset};
pub use row::{ColumnSet, Row, ValueType};
