//! Bookshelf key-value storage adapters.
//!
//! This is the persistence floor of the Bookshelf stack. Everything at this
//! level is a string key pointing at opaque bytes - no records, no schema.
//!
//! Two adapters ship with the crate:
//! - [`InMemoryStorage`] keeps entries for the lifetime of the process and can
//!   simulate a size quota or a medium that rejects every write
//! - [`LocalDiskStorage`] keeps one file per key under a root directory
//!
//! Writes to a real medium can fail (quota exceeded, read-only or private
//! storage), so callers probe once with [`storage_available`] before relying
//! on an adapter.
//!
//! # Example
//!
//! ```rust
//! use bookshelf_kv_store::{storage_available, Bytes, InMemoryStorage, StorageAdapter};
//!
//! let mut storage = InMemoryStorage::new();
//! assert!(storage_available(&mut storage));
//!
//! storage.set_item("greeting", Bytes::from_static(b"hello")).unwrap();
//! assert_eq!(
//!     storage.get_item("greeting").unwrap(),
//!     Some(Bytes::from_static(b"hello"))
//! );
//! ```

pub use bytes::Bytes;

mod error;
mod traits;

pub mod in_memory;
pub mod local_disk;
pub mod probe;

pub use error::KvError;
pub use in_memory::InMemoryStorage;
pub use local_disk::LocalDiskStorage;
pub use probe::{storage_available, PROBE_KEY};
pub use traits::{validate_key, StorageAdapter};
