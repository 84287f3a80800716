//! Error types for query configuration.

use thiserror::Error;

/// Errors raised when a candle query is incomplete.
///
/// Only emptiness is checked locally; unknown symbols and malformed
/// timestamps are left for the remote API to reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The security symbol is empty.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// The start of the requested range is empty.
    #[error("start of range must not be empty")]
    EmptyFrom,
}
