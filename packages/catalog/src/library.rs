//! The library store: the authoritative list of books.
//!
//! The store owns its storage adapter. Availability is probed once, in
//! [`LibraryStore::load`], and that answer gates every later write. Each
//! mutation rewrites the whole collection under the library key before
//! returning; a failed write is logged and dropped, never undoing the
//! in-memory change.

use bookshelf_kv_store::{storage_available, validate_key, StorageAdapter};

use crate::book::{Book, BookFields, BookId};
use crate::codec::JsonCodec;
use crate::error::CatalogError;

/// Key the library is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "myLibrary";

/// How [`LibraryStore::load`] reads existing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Storage key holding the serialized library.
    pub key: String,
    /// On malformed stored data, delete it and start empty instead of failing.
    pub reset_corrupt: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            reset_corrupt: false,
        }
    }
}

/// The ordered book collection and its persisted copy.
pub struct LibraryStore<S> {
    storage: S,
    key: String,
    available: bool,
    books: Vec<Book>,
    next_id: u64,
    codec: JsonCodec,
}

impl<S: StorageAdapter> LibraryStore<S> {
    /// Probe `storage`, then rebuild the library from the value under
    /// `options.key`.
    ///
    /// Unavailable storage or a missing value gives an empty library. A value
    /// that does not decode fails with [`CatalogError::Decode`] unless
    /// `options.reset_corrupt` is set, in which case it is removed.
    pub fn load(mut storage: S, options: LoadOptions) -> Result<Self, CatalogError> {
        validate_key(&options.key)?;
        let available = storage_available(&mut storage);

        let mut store = Self {
            storage,
            key: options.key,
            available,
            books: Vec::new(),
            next_id: 0,
            codec: JsonCodec,
        };

        if !available {
            log::warn!("storage unavailable; the library will not be saved this session");
            return Ok(store);
        }

        let Some(bytes) = store.storage.get_item(&store.key)? else {
            log::info!("no library stored under '{}'", store.key);
            return Ok(store);
        };

        match store.codec.decode(&store.key, &bytes) {
            Ok(records) => {
                for fields in records {
                    store.push(fields);
                }
                log::info!(
                    "loaded {} book(s) from '{}'",
                    store.books.len(),
                    store.key
                );
            }
            Err(e) if options.reset_corrupt => {
                log::warn!("discarding unreadable library: {}", e);
                store.storage.remove_item(&store.key)?;
            }
            Err(e) => return Err(e),
        }

        Ok(store)
    }

    /// Append a book and persist. Returns the stored book, id assigned.
    pub fn add(&mut self, fields: BookFields) -> &Book {
        let index = self.books.len();
        self.push(fields);
        self.persist();
        &self.books[index]
    }

    /// Remove the book with `id` and persist.
    ///
    /// An absent id leaves the sequence alone but still rewrites it, exactly
    /// as a successful removal would.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let removed = self
            .books
            .iter()
            .position(|book| book.id() == id)
            .map(|index| self.books.remove(index));
        self.persist();
        removed
    }

    /// Flip the read flag of the book with `id` and persist. An absent id
    /// returns `None` without writing.
    pub fn toggle_read(&mut self, id: BookId) -> Option<&Book> {
        let index = self.books.iter().position(|book| book.id() == id)?;
        self.books[index].toggle_read();
        self.persist();
        Some(&self.books[index])
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    /// Books in display order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The startup probe result.
    pub fn storage_available(&self) -> bool {
        self.available
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the adapter back, e.g. to reload from it.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn push(&mut self, fields: BookFields) -> BookId {
        let id = BookId::new(self.next_id);
        self.next_id += 1;
        self.books.push(Book::new(id, fields));
        id
    }

    fn persist(&mut self) {
        if !self.available {
            return;
        }

        let result = self
            .codec
            .encode(&self.books)
            .and_then(|bytes| {
                self.storage
                    .set_item(&self.key, bytes)
                    .map_err(CatalogError::from)
            });

        if let Err(e) = result {
            log::warn!("failed to save library under '{}': {}", self.key, e);
        }
    }
}
