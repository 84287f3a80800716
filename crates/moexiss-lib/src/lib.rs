//! Rust library for paging Moscow Exchange ISS candles into CSV.
//!
//! This is a facade crate that re-exports functionality from the moexiss
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use moexiss_lib::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IssClient::with_defaults()?;
//!     let query = CandleQuery::new(Market::Equity, "SBER", "2024-03-01")
//!         .with_interval(Interval::Hour1);
//!
//!     let mut cursor = candles(client, &query)?;
//!     let mut writer = OutputFormat::Csv.row_writer(std::io::stdout());
//!     writer.write_header(cursor.column_names())?;
//!     while cursor.advance() {
//!         if let Some(row) = cursor.current_row() {
//!             writer.write_row(row)?;
//!         }
//!     }
//!     writer.flush()?;
//!
//!     if let Some(err) = cursor.into_error() {
//!         return Err(err.into());
//!     }
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/moexiss/moexiss/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use moexiss_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use moexiss_fetch::{
    CandleCursor, CandleSource, ChunkFetcher, ChunkSource, ClientConfig, Cursor, CursorState,
    DecodeError, ISS_DATETIME_FORMAT, IssClient, IssError, ValueDecoder, candles,
};

#[cfg(feature = "fetch")]
pub use moexiss_fetch::url::BASE_URL;

// Re-export formatters
#[cfg(feature = "format")]
pub use moexiss_format::{
    CsvFormatter, CsvRowWriter, FormatError, JsonFormatter, JsonRowWriter, OutputFormat,
    RowWriter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use moexiss_lib::prelude::*;
/// ```
pub mod prelude {
    pub use moexiss_types::{
        CandleQuery, ColumnSet, Interval, Market, QueryError, Row, ValueType, moscow_offset,
    };

    #[cfg(feature = "fetch")]
    pub use moexiss_fetch::{
        ChunkSource, ClientConfig, Cursor, CursorState, IssClient, IssError, candles,
    };

    #[cfg(feature = "format")]
    pub use moexiss_format::{CsvFormatter, FormatError, JsonFormatter, OutputFormat, RowWriter};
}
