//! Error types for the catalog layer.

use bookshelf_kv_store::KvError;

use crate::projector::RowId;

/// Errors raised by the catalog.
///
/// Persistence failures after startup are not errors here: the library logs
/// and drops them. What remains are load-time failures and misuse of the
/// table or form.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The storage medium failed while loading.
    #[error("storage error: {0}")]
    Storage(#[from] KvError),

    /// The stored value is not a list of book records.
    #[error("decode error under '{key}': {message}")]
    Decode { key: String, message: String },

    /// The library could not be serialized.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// No visible row carries this id.
    #[error("no row {0} in the table")]
    UnknownRow(RowId),

    /// A form field was edited or submitted while the form was hidden.
    #[error("the book form is not open (use 'new' first)")]
    FormClosed,
}
