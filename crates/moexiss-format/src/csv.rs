//! CSV output format.

use moexiss_types::{ColumnSet, Row};
use std::io::Write;

use crate::{FormatError, RowWriter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: u8,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            include_header: true,
        }
    }

    /// Wraps `writer` in a streaming CSV row writer.
    pub fn writer<W: Write>(&self, writer: W) -> CsvRowWriter<W> {
        CsvRowWriter {
            inner: csv::WriterBuilder::new()
                .delimiter(self.delimiter)
                .has_headers(false)
                .from_writer(writer),
            include_header: self.include_header,
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming CSV writer produced by [`CsvFormatter::writer`].
///
/// Quoting and escaping follow RFC 4180. Every row must have as many
/// values as the first record written.
#[derive(Debug)]
pub struct CsvRowWriter<W: Write> {
    inner: csv::Writer<W>,
    include_header: bool,
}

impl<W: Write> CsvRowWriter<W> {
    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn into_inner(self) -> Result<W, FormatError> {
        self.inner
            .into_inner()
            .map_err(|e| FormatError::Io(e.into_error()))
    }
}

impl<W: Write> RowWriter for CsvRowWriter<W> {
    fn write_header(&mut self, columns: &ColumnSet) -> Result<(), FormatError> {
        if self.include_header {
            self.inner.write_record(columns.iter())?;
        }
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> Result<(), FormatError> {
        self.inner.write_record(row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), FormatError> {
        self.inner.flush()?;
        Ok(())
    }
}
