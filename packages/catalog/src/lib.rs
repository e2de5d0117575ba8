//! # bookshelf-catalog
//!
//! The catalog core of Bookshelf: a persisted, ordered list of books and the
//! table that mirrors it.
//!
//! Three copies of the same data are kept in step:
//!
//! 1. the in-memory sequence owned by [`LibraryStore`]
//! 2. the serialized copy under one key of a
//!    [`StorageAdapter`](bookshelf_kv_store::StorageAdapter)
//! 3. the rows of a [`TableView`]
//!
//! Every mutation rewrites the serialized copy in full before returning, and
//! patches only the affected table row. [`Catalog`] wires the three together
//! along with the [`BookForm`] used to enter new books.
//!
//! ## Example
//!
//! ```rust
//! use bookshelf_catalog::{BookFields, Catalog, LoadOptions, Pages};
//! use bookshelf_kv_store::InMemoryStorage;
//!
//! let mut catalog = Catalog::open(InMemoryStorage::new(), LoadOptions::default()).unwrap();
//!
//! let row = catalog.add_book(BookFields {
//!     title: "LOTR".to_string(),
//!     author: "Tolkien".to_string(),
//!     pages: Pages::Count(442),
//!     read: false,
//! });
//!
//! let book = catalog.toggle_row(row).unwrap();
//! assert_eq!(book.read_display(), "Read");
//!
//! catalog.remove_row(row).unwrap();
//! assert!(catalog.library().is_empty());
//! assert!(catalog.view().is_hidden());
//! ```

pub mod app;
pub mod book;
pub mod codec;
pub mod error;
pub mod intake;
pub mod library;
pub mod projector;

pub use app::Catalog;
pub use book::{Book, BookFields, BookId, Pages};
pub use codec::JsonCodec;
pub use error::CatalogError;
pub use intake::{BookForm, ReadChoice};
pub use library::{LibraryStore, LoadOptions, DEFAULT_STORAGE_KEY};
pub use projector::{Row, RowId, TableView};
