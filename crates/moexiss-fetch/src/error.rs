//! Error types for fetching and decoding ISS pages.

use moexiss_types::QueryError;
use thiserror::Error;

/// Errors that end a candle query.
///
/// Every variant is fatal to the query: a cursor that hits one stops
/// producing rows and keeps reporting the error.
#[derive(Error, Debug)]
pub enum IssError {
    /// The endpoint URL could not be built.
    #[error("can't build ISS url: {0}")]
    UrlBuild(String),

    /// The HTTP call failed or returned a non-success status.
    #[error("can't call ISS api: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The response did not match the expected shape.
    #[error("can't decode ISS response: {0}")]
    Decode(#[from] DecodeError),

    /// The query was incomplete.
    #[error("invalid query: {0}")]
    Query(#[from] QueryError),
}

impl From<url::ParseError> for IssError {
    fn from(err: url::ParseError) -> Self {
        Self::UrlBuild(err.to_string())
    }
}

/// Errors raised while decoding a response body or a row of it.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The body was not valid JSON, or a block had the wrong shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The expected series block was absent.
    #[error("response has no '{0}' block")]
    MissingSeries(String),

    /// A requested column was absent from the response.
    #[error("response has no '{0}' column")]
    MissingColumn(String),

    /// A row index outside the current chunk was requested.
    #[error("row {index} is outside a chunk of {len} rows")]
    RowOutOfRange {
        /// Requested chunk-local index.
        index: usize,
        /// Rows in the chunk.
        len: usize,
    },

    /// A data row had fewer values than the response declared columns.
    #[error("row {index} has {found} values, expected at least {expected}")]
    RowWidth {
        /// Chunk-local row index.
        index: usize,
        /// Values required to reach every requested column.
        expected: usize,
        /// Values present.
        found: usize,
    },

    /// A `datetime` value could not be parsed.
    #[error("invalid datetime '{value}' in column '{column}': {source}")]
    Datetime {
        /// Column name.
        column: String,
        /// The raw value.
        value: String,
        /// Underlying parse error.
        source: chrono::ParseError,
    },

    /// A `datetime` value cannot be shifted to UTC without leaving the
    /// representable range.
    #[error("datetime '{value}' in column '{column}' is out of range")]
    DatetimeOutOfRange {
        /// Column name.
        column: String,
        /// The raw value.
        value: String,
    },

    /// A `datetime` column held something other than a string.
    #[error("column '{column}' is declared datetime but holds {value}")]
    NotATimestamp {
        /// Column name.
        column: String,
        /// The raw JSON value.
        value: String,
    },
}
