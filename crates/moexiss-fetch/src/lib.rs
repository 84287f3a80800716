//! HTTP client, pagination cursor and candle decoding for moexiss.
//!
//! This crate provides the data retrieval pipeline:
//!
//! - [`IssClient`] - Blocking HTTP client for ISS endpoints
//! - [`url::query_url`] - Endpoint and query parameter construction
//! - [`ChunkSource`] - One page fetch plus row decoding, per source
//! - [`ChunkFetcher`] - Index-addressed view of the current page
//! - [`Cursor`] - Continuous row sequence across pages
//! - [`candles`] - Opens a cursor over one security's candles

#![doc(issue_tracker_base_url = "https://github.com/moexiss/moexiss/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod candles;
mod chunk;
mod client;
mod cursor;
mod decode;
mod error;
pub mod page;
mod source;
pub mod url;

pub use candles::{CandleCursor, CandleSource, candles};
pub use chunk::ChunkFetcher;
pub use client::{ClientConfig, IssClient};
pub use cursor::{Cursor, CursorState};
pub use decode::{ISS_DATETIME_FORMAT, ValueDecoder};
pub use error::{DecodeError, IssError};
pub use source::ChunkSource;
