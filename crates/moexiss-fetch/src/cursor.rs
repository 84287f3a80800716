//! Forward-only cursor over a paged row sequence.

use moexiss_types::{ColumnSet, Row};
use tracing::{info, warn};

use crate::{ChunkFetcher, ChunkSource};

/// Lifecycle state of a [`Cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Rows may remain.
    Active,
    /// The source returned an empty chunk.
    Done,
    /// A fetch or decode failed; see [`Cursor::error`].
    Failed,
}

/// Presents a chunked source as one continuous row sequence.
///
/// Chunk 0 is fetched when the cursor is created. Later chunks are fetched
/// lazily, on the calling thread, when [`advance`](Self::advance) steps past
/// the end of the current one, so at most one page is held in memory.
///
/// ```ignore
/// let mut cursor = Cursor::new(fetcher)?;
/// println!("{:?}", cursor.column_names());
/// while cursor.advance() {
///     println!("{:?}", cursor.current_row());
/// }
/// if let Some(err) = cursor.error() {
///     return Err(err);
/// }
/// ```
#[derive(Debug)]
pub struct Cursor<S: ChunkSource> {
    fetcher: ChunkFetcher<S>,
    offset: usize,
    state: CursorState,
    error: Option<S::Error>,
    row: Option<Row>,
}

impl<S: ChunkSource> Cursor<S> {
    /// Creates a cursor and eagerly fetches chunk 0.
    ///
    /// # Errors
    ///
    /// Returns the error of the first fetch; no cursor is created then.
    pub fn new(mut fetcher: ChunkFetcher<S>) -> Result<Self, S::Error> {
        fetcher.fetch_next(0)?;
        Ok(Self {
            fetcher,
            offset: 0,
            state: CursorState::Active,
            error: None,
            row: None,
        })
    }

    /// Moves to the next row, fetching the next chunk when needed.
    ///
    /// Returns false once the sequence is exhausted or an error occurred;
    /// from then on every call returns false without touching the source.
    /// Check [`error`](Self::error) to tell the two apart.
    pub fn advance(&mut self) -> bool {
        if self.state != CursorState::Active {
            return false;
        }

        self.fetcher.advance();

        if self.fetcher.exhausted() {
            // An empty chunk already marks the end; never ask for it again.
            if self.fetcher.is_empty() {
                return self.finish();
            }
            match self.fetcher.fetch_next(self.offset) {
                Ok(0) => return self.finish(),
                Ok(_) => self.fetcher.advance(),
                Err(err) => return self.fail(err),
            }
        }

        match self.fetcher.current_row() {
            Ok(row) => self.row = row,
            Err(err) => return self.fail(err),
        }

        self.offset += 1;
        true
    }

    /// Returns the row selected by the last successful [`advance`](Self::advance).
    #[must_use]
    pub const fn current_row(&self) -> Option<&Row> {
        self.row.as_ref()
    }

    /// Returns the error that stopped the cursor, if any. Never cleared.
    #[must_use]
    pub const fn error(&self) -> Option<&S::Error> {
        self.error.as_ref()
    }

    /// Consumes the cursor and returns its error, if any.
    #[must_use]
    pub fn into_error(self) -> Option<S::Error> {
        self.error
    }

    /// Returns the column set, stable for the cursor's lifetime.
    #[must_use]
    pub const fn column_names(&self) -> &ColumnSet {
        self.fetcher.column_names()
    }

    /// Returns the number of rows produced so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> CursorState {
        self.state
    }

    fn finish(&mut self) -> bool {
        info!(rows = self.offset, "cursor exhausted");
        self.state = CursorState::Done;
        self.row = None;
        false
    }

    fn fail(&mut self, err: S::Error) -> bool {
        warn!(rows = self.offset, "cursor failed");
        self.state = CursorState::Failed;
        self.error = Some(err);
        self.row = None;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum FakeError {
        Fetch(usize),
        Decode(usize),
    }

    /// Serves pages of the given sizes in call order and records every
    /// offset it is asked for. Row values are their logical index.
    #[derive(Debug, Default)]
    struct FakeSource {
        pages: Vec<usize>,
        fail_on_call: Option<usize>,
        bad_row: Option<usize>,
        offsets: Rc<RefCell<Vec<usize>>>,
        current_offset: usize,
    }

    impl FakeSource {
        fn pages(pages: &[usize]) -> Self {
            Self {
                pages: pages.to_vec(),
                ..Default::default()
            }
        }
    }

    impl ChunkSource for FakeSource {
        type Error = FakeError;

        fn fetch_chunk(&mut self, offset: usize) -> Result<usize, FakeError> {
            let call = self.offsets.borrow().len();
            self.offsets.borrow_mut().push(offset);
            if self.fail_on_call == Some(call) {
                return Err(FakeError::Fetch(offset));
            }
            self.current_offset = offset;
            Ok(self.pages.get(call).copied().unwrap_or(0))
        }

        fn decode_row(&self, index: usize) -> Result<Row, FakeError> {
            let logical = self.current_offset + index;
            if self.bad_row == Some(logical) {
                return Err(FakeError::Decode(logical));
            }
            Ok(vec![logical.to_string(), format!("v{logical}")])
        }
    }

    fn cursor(source: FakeSource) -> Cursor<FakeSource> {
        Cursor::new(ChunkFetcher::new(source, ColumnSet::new(["n", "v"]))).unwrap()
    }

    fn drain(cursor: &mut Cursor<FakeSource>) -> Vec<usize> {
        let mut rows = Vec::new();
        while cursor.advance() {
            rows.push(cursor.current_row().unwrap()[0].parse().unwrap());
        }
        rows
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let mut cursor = cursor(FakeSource::pages(&[3, 3, 3, 0]));

        assert_eq!(drain(&mut cursor), (0..9).collect::<Vec<_>>());
        assert!(!cursor.advance());
        assert!(cursor.error().is_none());
        assert_eq!(cursor.state(), CursorState::Done);
        assert_eq!(cursor.offset(), 9);
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let source = FakeSource::pages(&[3, 2, 4, 0]);
        let offsets = Rc::clone(&source.offsets);
        let mut cursor = cursor(source);

        drain(&mut cursor);
        assert_eq!(*offsets.borrow(), vec![0, 3, 5, 9]);
    }

    #[test]
    fn test_empty_first_page() {
        let source = FakeSource::pages(&[0]);
        let offsets = Rc::clone(&source.offsets);
        let mut cursor = cursor(source);

        assert!(!cursor.advance());
        assert!(cursor.error().is_none());
        assert_eq!(cursor.state(), CursorState::Done);
        assert_eq!(cursor.current_row(), None);
        assert_eq!(*offsets.borrow(), vec![0]);
    }

    #[test]
    fn test_first_fetch_failure_fails_construction() {
        let source = FakeSource {
            fail_on_call: Some(0),
            ..FakeSource::pages(&[3])
        };
        let result = Cursor::new(ChunkFetcher::new(source, ColumnSet::new(["n"])));
        assert_eq!(result.unwrap_err(), FakeError::Fetch(0));
    }

    #[test]
    fn test_fetch_failure_is_sticky() {
        let source = FakeSource {
            fail_on_call: Some(2),
            ..FakeSource::pages(&[3, 3, 3, 0])
        };
        let offsets = Rc::clone(&source.offsets);
        let mut cursor = cursor(source);

        assert_eq!(drain(&mut cursor), (0..6).collect::<Vec<_>>());
        assert_eq!(cursor.error(), Some(&FakeError::Fetch(6)));
        assert_eq!(cursor.state(), CursorState::Failed);

        let calls = offsets.borrow().len();
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(offsets.borrow().len(), calls);
        assert_eq!(cursor.error(), Some(&FakeError::Fetch(6)));
    }

    #[test]
    fn test_decode_failure_stops_cursor() {
        let source = FakeSource {
            bad_row: Some(4),
            ..FakeSource::pages(&[3, 3, 0])
        };
        let mut cursor = cursor(source);

        assert_eq!(drain(&mut cursor), vec![0, 1, 2, 3]);
        assert_eq!(cursor.into_error(), Some(FakeError::Decode(4)));
    }

    #[test]
    fn test_rows_carry_every_column() {
        let mut cursor = cursor(FakeSource::pages(&[1, 0]));

        assert_eq!(cursor.column_names().names(), &["n", "v"]);
        assert!(cursor.advance());
        assert_eq!(
            cursor.current_row(),
            Some(&vec!["0".to_string(), "v0".to_string()])
        );
        assert!(!cursor.advance());
        assert_eq!(cursor.column_names().len(), 2);
    }
}
