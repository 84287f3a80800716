//! ISS JSON page parsing.
//!
//! An ISS response is an object of named blocks. Each block has the shape:
//!
//! ```json
//! {
//!   "metadata": { "<column>": { "type": "datetime" }, ... },
//!   "columns": [ "<column>", ... ],
//!   "data": [ [ <value>, ... ], ... ]
//! }
//! ```

use moexiss_types::ValueType;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::DecodeError;

/// Series block name for candle endpoints.
pub const CANDLES_SERIES: &str = "candles";

/// Declared metadata of one response column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMeta {
    /// ISS type name (`datetime`, `double`, `int64`, `string`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// One block of an ISS response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Table {
    /// Per-column metadata.
    #[serde(default)]
    pub metadata: HashMap<String, ColumnMeta>,
    /// Column names in data order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows of untyped values.
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl Table {
    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the position of `column` in the data rows.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingColumn`] if the column is absent.
    pub fn position(&self, column: &str) -> Result<usize, DecodeError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DecodeError::MissingColumn(column.to_string()))
    }

    /// Returns the declared type of `column`; undeclared columns are plain.
    #[must_use]
    pub fn value_type(&self, column: &str) -> ValueType {
        self.metadata
            .get(column)
            .map_or(ValueType::Plain, |meta| ValueType::from_metadata(&meta.kind))
    }
}

/// Parses a response body and extracts the `series` block.
///
/// Other blocks are ignored and may have any shape.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the body or the block is malformed, or
/// [`DecodeError::MissingSeries`] if the block is absent.
pub fn parse_page(body: &str, series: &str) -> Result<Table, DecodeError> {
    let mut blocks: HashMap<String, Value> = serde_json::from_str(body)?;
    let block = blocks
        .remove(series)
        .ok_or_else(|| DecodeError::MissingSeries(series.to_string()))?;
    Ok(serde_json::from_value(block)?)
}
