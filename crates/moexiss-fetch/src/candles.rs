//! Candle queries against the ISS HTTP API.

use moexiss_types::{CandleQuery, ColumnSet, Row, ValueType};
use tracing::debug;
use url::Url;

use crate::page::{CANDLES_SERIES, Table, parse_page};
use crate::url::{START_PARAM, query_url, set_query_param};
use crate::{ChunkFetcher, ChunkSource, Cursor, DecodeError, IssClient, IssError, ValueDecoder};

/// Cursor over the candles of one query.
pub type CandleCursor = Cursor<CandleSource>;

/// Where a requested column sits in the current page and how to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    position: usize,
    kind: ValueType,
}

/// HTTP-backed [`ChunkSource`] serving one ISS series page by page.
///
/// Used for every market kind; only the URL differs.
#[derive(Debug)]
pub struct CandleSource {
    client: IssClient,
    url: Url,
    series: String,
    columns: ColumnSet,
    decoder: ValueDecoder,
    table: Table,
    bindings: Vec<Binding>,
}

impl CandleSource {
    /// Creates a source for `query`. No request is made yet.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Query`] for an incomplete query, or
    /// [`IssError::UrlBuild`] if the endpoint URL cannot be built.
    pub fn new(client: IssClient, query: &CandleQuery) -> Result<Self, IssError> {
        query.validate()?;
        let url = query_url(&client.base_url()?, query, CANDLES_SERIES)?;
        Ok(Self {
            client,
            url,
            series: CANDLES_SERIES.to_string(),
            columns: query.columns(),
            decoder: ValueDecoder::new(query.utc_offset()),
            table: Table::default(),
            bindings: Vec::new(),
        })
    }

    /// Returns the request URL of the most recent page.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the column set this source decodes.
    #[must_use]
    pub const fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Resolves each requested column against a page's column list.
    fn bind(&self, table: &Table) -> Result<Vec<Binding>, DecodeError> {
        self.columns
            .iter()
            .map(|name| {
                Ok(Binding {
                    position: table.position(name)?,
                    kind: table.value_type(name),
                })
            })
            .collect()
    }

    /// Replaces the current page with a parsed response body.
    fn load(&mut self, body: &str) -> Result<usize, IssError> {
        let table = parse_page(body, &self.series)?;
        // An empty page may come without a column list.
        self.bindings = if table.is_empty() {
            Vec::new()
        } else {
            self.bind(&table)?
        };
        self.table = table;
        Ok(self.table.len())
    }
}

impl ChunkSource for CandleSource {
    type Error = IssError;

    fn fetch_chunk(&mut self, offset: usize) -> Result<usize, IssError> {
        set_query_param(&mut self.url, START_PARAM, &offset.to_string());
        let body = self.client.get_text(&self.url)?;
        let size = self.load(&body)?;
        debug!(offset, size, "decoded candles page");
        Ok(size)
    }

    fn decode_row(&self, index: usize) -> Result<Row, IssError> {
        let values = self.table.data.get(index).ok_or(DecodeError::RowOutOfRange {
            index,
            len: self.table.len(),
        })?;

        let needed = self.bindings.iter().map(|b| b.position + 1).max().unwrap_or(0);
        if values.len() < needed {
            return Err(DecodeError::RowWidth {
                index,
                expected: needed,
                found: values.len(),
            }
            .into());
        }

        self.columns
            .iter()
            .zip(&self.bindings)
            .map(|(name, binding)| {
                self.decoder
                    .decode(name, binding.kind, &values[binding.position])
                    .map_err(IssError::from)
            })
            .collect()
    }
}

/// Opens a cursor over the candles described by `query`.
///
/// The first page is requested before this returns.
///
/// # Errors
///
/// Returns an error if the query is incomplete, the URL cannot be built,
/// or the first page cannot be fetched or decoded.
pub fn candles(client: IssClient, query: &CandleQuery) -> Result<CandleCursor, IssError> {
    let source = CandleSource::new(client, query)?;
    let columns = source.columns().clone();
    Cursor::new(ChunkFetcher::new(source, columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use moexiss_types::Market;

    const PAGE: &str = r#"{
        "candles": {
            "metadata": {
                "open": {"type": "double"},
                "close": {"type": "double"},
                "volume": {"type": "double"},
                "begin": {"type": "datetime"}
            },
            "columns": ["open", "close", "volume", "begin"],
            "data": [
                [280.1, 280.5, 12000, "2024-03-01 10:00:00"],
                [280.5, 280.2, 8000, "2024-03-01 10:01:00"]
            ]
        }
    }"#;

    fn source() -> CandleSource {
        let query = CandleQuery::new(Market::Equity, "SBER", "2024-03-01");
        CandleSource::new(IssClient::with_defaults().unwrap(), &query).unwrap()
    }

    #[test]
    fn test_rows_follow_requested_column_order() {
        let mut source = source();
        assert_eq!(source.load(PAGE).unwrap(), 2);

        assert_eq!(
            source.decode_row(0).unwrap(),
            vec!["2024-03-01T10:00:00+03:00", "280.1", "280.5", "12000"]
        );
        assert_eq!(source.decode_row(1).unwrap()[0], "2024-03-01T10:01:00+03:00");
    }

    #[test]
    fn test_row_out_of_range() {
        let mut source = source();
        source.load(PAGE).unwrap();
        assert!(matches!(
            source.decode_row(2),
            Err(IssError::Decode(DecodeError::RowOutOfRange { index: 2, len: 2 }))
        ));
    }

    #[test]
    fn test_empty_page_needs_no_columns() {
        let mut source = source();
        assert_eq!(source.load(r#"{"candles": {"data": []}}"#).unwrap(), 0);
    }

    #[test]
    fn test_missing_requested_column() {
        let mut source = source();
        let body = r#"{"candles": {"columns": ["begin", "open"], "data": [["2024-03-01 10:00:00", 1]]}}"#;
        assert!(matches!(
            source.load(body),
            Err(IssError::Decode(DecodeError::MissingColumn(c))) if c == "close"
        ));
    }

    #[test]
    fn test_short_row() {
        let mut source = source();
        let body = r#"{"candles": {
            "columns": ["begin", "open", "close", "volume"],
            "data": [["2024-03-01 10:00:00", 1, 2]]
        }}"#;
        source.load(body).unwrap();
        assert!(matches!(
            source.decode_row(0),
            Err(IssError::Decode(DecodeError::RowWidth { expected: 4, found: 3, .. }))
        ));
    }

    #[test]
    fn test_bad_timestamp_fails_the_row() {
        let mut source = source();
        let body = r#"{"candles": {
            "metadata": {"begin": {"type": "datetime"}},
            "columns": ["begin", "open", "close", "volume"],
            "data": [["01.03.2024 10:00", 1, 2, 3]]
        }}"#;
        source.load(body).unwrap();
        assert!(matches!(
            source.decode_row(0),
            Err(IssError::Decode(DecodeError::Datetime { .. }))
        ));
    }

    #[test]
    fn test_invalid_query_is_rejected() {
        let query = CandleQuery::new(Market::Currency, "", "2024-03-01");
        let result = CandleSource::new(IssClient::with_defaults().unwrap(), &query);
        assert!(matches!(result, Err(IssError::Query(_))));
    }

    #[test]
    fn test_url_has_query_parameters() {
        let source = source();
        let url = source.url().as_str();
        assert!(url.starts_with(
            "https://iss.moex.com/iss/engines/stock/markets/shares/securities/SBER/candles.json?"
        ));
        assert!(url.contains("from=2024-03-01"));
        assert!(url.contains("interval=1"));
        assert!(!url.contains("till="));
    }
}
