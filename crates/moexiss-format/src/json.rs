//! Newline-delimited JSON output format.

use moexiss_types::{ColumnSet, Row};
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, RowWriter};

/// NDJSON formatter: one object per row, keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Wraps `writer` in a streaming NDJSON row writer.
    pub const fn writer<W: Write>(&self, writer: W) -> JsonRowWriter<W> {
        JsonRowWriter {
            writer,
            columns: Vec::new(),
        }
    }
}

/// Streaming NDJSON writer produced by [`JsonFormatter::writer`].
#[derive(Debug)]
pub struct JsonRowWriter<W> {
    writer: W,
    columns: Vec<String>,
}

impl<W: Write> JsonRowWriter<W> {
    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowWriter for JsonRowWriter<W> {
    fn write_header(&mut self, columns: &ColumnSet) -> Result<(), FormatError> {
        self.columns = columns.names().to_vec();
        Ok(())
    }

    fn write_row(&mut self, row: &Row) -> Result<(), FormatError> {
        if row.len() != self.columns.len() {
            return Err(FormatError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        let object: Map<String, Value> = self
            .columns
            .iter()
            .zip(row)
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        serde_json::to_writer(&mut self.writer, &object)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), FormatError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndjson_rows() {
        let mut writer = JsonFormatter::new().writer(Vec::new());
        writer
            .write_header(&ColumnSet::new(["begin", "close"]))
            .unwrap();
        writer
            .write_row(&vec!["2024-03-01T10:00:00+03:00".into(), "280.5".into()])
            .unwrap();
        writer
            .write_row(&vec!["2024-03-01T10:01:00+03:00".into(), "280.2".into()])
            .unwrap();

        let result = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["begin"], "2024-03-01T10:00:00+03:00");
        assert_eq!(first["close"], "280.5");
    }

    #[test]
    fn test_ndjson_width_mismatch() {
        let mut writer = JsonFormatter::new().writer(Vec::new());
        writer.write_header(&ColumnSet::new(["a", "b"])).unwrap();
        assert!(matches!(
            writer.write_row(&vec!["1".into()]),
            Err(FormatError::RowWidth {
                expected: 2,
                found: 1
            })
        ));
    }
}
