//! Output format abstraction.

use moexiss_types::{ColumnSet, Row};
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Newline-delimited JSON objects keyed by column name.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Ndjson => "ndjson",
        }
    }

    /// Creates a row writer for this format over `writer`.
    pub fn row_writer<'a, W: Write + 'a>(&self, writer: W) -> Box<dyn RowWriter + 'a> {
        match self {
            Self::Csv => Box::new(CsvFormatter::new().writer(writer)),
            Self::Tsv => Box::new(CsvFormatter::tsv().writer(writer)),
            Self::Ndjson => Box::new(JsonFormatter::new().writer(writer)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error (including rows whose width differs from the header).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row had a different number of values than the header.
    #[error("row has {found} values, header has {expected}")]
    RowWidth {
        /// Columns in the header.
        expected: usize,
        /// Values in the row.
        found: usize,
    },
}

/// Streaming sink for a header followed by rows.
///
/// Rows are written as they arrive; nothing is buffered beyond the
/// underlying writer's own buffer.
pub trait RowWriter {
    /// Writes (or records) the header. Call once, before any row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_header(&mut self, columns: &ColumnSet) -> Result<(), FormatError>;

    /// Writes one row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_row(&mut self, row: &Row) -> Result<(), FormatError>;

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&mut self) -> Result<(), FormatError>;
}
