//! Index-addressed access to the current chunk of a paged source.

use moexiss_types::{ColumnSet, Row};
use tracing::debug;

use crate::ChunkSource;

/// Holds one chunk of a [`ChunkSource`] and a position inside it.
///
/// The position starts unselected after every fetch; [`advance`](Self::advance)
/// moves it onto the first row and then one row at a time.
#[derive(Debug)]
pub struct ChunkFetcher<S> {
    source: S,
    columns: ColumnSet,
    size: usize,
    position: Option<usize>,
}

impl<S: ChunkSource> ChunkFetcher<S> {
    /// Creates a fetcher with no chunk loaded.
    #[must_use]
    pub const fn new(source: S, columns: ColumnSet) -> Self {
        Self {
            source,
            columns,
            size: 0,
            position: None,
        }
    }

    /// Fetches the chunk at the logical `offset` and returns its size.
    ///
    /// On success the previous chunk is replaced and no row is selected.
    /// On failure the fetcher is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the source's fetch or parse error.
    pub fn fetch_next(&mut self, offset: usize) -> Result<usize, S::Error> {
        let size = self.source.fetch_chunk(offset)?;
        debug!(offset, size, "fetched chunk");
        self.size = size;
        self.position = None;
        Ok(size)
    }

    /// Moves to the next row of the chunk. No I/O.
    pub const fn advance(&mut self) {
        self.position = match self.position {
            Some(p) => Some(p + 1),
            None => Some(0),
        };
    }

    /// Returns true when the position has reached or passed the chunk end.
    /// An unselected position is never exhausted.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        match self.position {
            Some(p) => p >= self.size,
            None => false,
        }
    }

    /// Returns true when the last fetched chunk had no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of rows in the current chunk.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns the chunk-local position, if a row is selected.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Decodes the row at the current position.
    ///
    /// Returns `Ok(None)` when no row is selected or the position is past
    /// the chunk end.
    ///
    /// # Errors
    ///
    /// Returns the source's decode error.
    pub fn current_row(&self) -> Result<Option<Row>, S::Error> {
        match self.position {
            Some(p) if p < self.size => self.source.decode_row(p).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns the column set.
    #[must_use]
    pub const fn column_names(&self) -> &ColumnSet {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves `pages[i]` rows on the i-th fetch; each row is `[offset + index]`.
    #[derive(Debug, Default)]
    struct Pages {
        pages: Vec<usize>,
        calls: usize,
        offset: usize,
    }

    impl ChunkSource for Pages {
        type Error = String;

        fn fetch_chunk(&mut self, offset: usize) -> Result<usize, String> {
            let size = self.pages.get(self.calls).copied().unwrap_or(0);
            self.calls += 1;
            self.offset = offset;
            Ok(size)
        }

        fn decode_row(&self, index: usize) -> Result<Row, String> {
            Ok(vec![(self.offset + index).to_string()])
        }
    }

    fn fetcher(pages: &[usize]) -> ChunkFetcher<Pages> {
        ChunkFetcher::new(
            Pages {
                pages: pages.to_vec(),
                ..Default::default()
            },
            ColumnSet::new(["n"]),
        )
    }

    #[test]
    fn test_walks_a_chunk() {
        let mut cf = fetcher(&[2]);
        assert_eq!(cf.fetch_next(10).unwrap(), 2);
        assert_eq!(cf.position(), None);
        assert_eq!(cf.current_row().unwrap(), None);
        assert!(!cf.exhausted());

        cf.advance();
        assert_eq!(cf.current_row().unwrap(), Some(vec!["10".to_string()]));
        cf.advance();
        assert_eq!(cf.current_row().unwrap(), Some(vec!["11".to_string()]));
        cf.advance();
        assert!(cf.exhausted());
        assert_eq!(cf.current_row().unwrap(), None);
    }

    #[test]
    fn test_fetch_resets_position() {
        let mut cf = fetcher(&[1, 3]);
        cf.fetch_next(0).unwrap();
        cf.advance();
        cf.advance();
        assert!(cf.exhausted());

        cf.fetch_next(1).unwrap();
        assert_eq!(cf.len(), 3);
        assert_eq!(cf.position(), None);
        assert!(!cf.exhausted());
    }

    #[test]
    fn test_empty_chunk() {
        let mut cf = fetcher(&[0]);
        cf.fetch_next(0).unwrap();
        assert!(cf.is_empty());
        assert!(!cf.exhausted());
        cf.advance();
        assert!(cf.exhausted());
        assert_eq!(cf.current_row().unwrap(), None);
        assert_eq!(cf.column_names().names(), &["n"]);
    }
}
