//! Page source abstraction behind the chunk fetcher.

use moexiss_types::Row;

/// A paged source of rows.
///
/// Implementors fetch one bounded page at a time and keep it until the
/// next fetch replaces it. [`ChunkFetcher`](crate::ChunkFetcher) and
/// [`Cursor`](crate::Cursor) are written once against this trait.
pub trait ChunkSource {
    /// Error produced by fetching or decoding.
    type Error;

    /// Fetches the page that starts at the logical `offset` (rows already
    /// produced by earlier pages), replacing the retained page.
    ///
    /// Returns the number of rows in the new page. Zero rows marks the end
    /// of the sequence and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched or parsed.
    fn fetch_chunk(&mut self, offset: usize) -> Result<usize, Self::Error>;

    /// Decodes the row at a chunk-local `index` of the retained page.
    ///
    /// # Errors
    ///
    /// Returns an error if a value fails type-specific decoding.
    fn decode_row(&self, index: usize) -> Result<Row, Self::Error>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    type Error = S::Error;

    fn fetch_chunk(&mut self, offset: usize) -> Result<usize, Self::Error> {
        (**self).fetch_chunk(offset)
    }

    fn decode_row(&self, index: usize) -> Result<Row, Self::Error> {
        (**self).decode_row(index)
    }
}
