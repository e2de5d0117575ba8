//! JSON codec for the persisted library.

use bytes::Bytes;

use crate::book::{Book, BookFields};
use crate::error::CatalogError;

/// Converts between the in-memory library and the bytes stored under the
/// library key.
///
/// The stored form is a bare JSON array of `{title, author, pages, read}`
/// objects, in display order.
///
/// # Example
///
/// ```rust
/// use bookshelf_catalog::{Book, BookFields, BookId, JsonCodec};
///
/// let codec = JsonCodec;
/// let book = Book::new(BookId::new(0), BookFields {
///     title: "Dune".to_string(),
///     ..BookFields::default()
/// });
///
/// let bytes = codec.encode(&[book.clone()]).unwrap();
/// let records = codec.decode("myLibrary", &bytes).unwrap();
///
/// assert_eq!(records, vec![book.fields()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn encode(&self, books: &[Book]) -> Result<Bytes, CatalogError> {
        let bytes = serde_json::to_vec(books).map_err(|e| CatalogError::Encode {
            message: e.to_string(),
        })?;
        Ok(Bytes::from(bytes))
    }

    /// Decode stored bytes. `key` only labels the error.
    pub fn decode(&self, key: &str, bytes: &[u8]) -> Result<Vec<BookFields>, CatalogError> {
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
