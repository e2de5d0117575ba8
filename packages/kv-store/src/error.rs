//! Error types for the storage layer.
//!
//! Errors at this level describe the medium only. Whether the bytes under a
//! key make sense is a question for higher layers.

use std::path::PathBuf;

/// Errors raised by a [`StorageAdapter`](crate::StorageAdapter).
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    /// The medium refuses all writes (disabled, private mode, read-only).
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// The write would push the medium past its size limit.
    #[error("quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key cannot be represented by this adapter.
    #[error("invalid key '{key}': {message}")]
    InvalidKey { key: String, message: String },

    /// The root directory of a disk-backed adapter is unusable.
    #[error("storage root {} is invalid: {source}", path.display())]
    RootPathInvalid {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KvError {
    /// True when the medium rejected a write for lack of space.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, KvError::QuotaExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn unavailable_display() {
        let e = KvError::Unavailable {
            reason: "private mode".to_string(),
        };
        assert_eq!(format!("{}", e), "storage unavailable: private mode");
    }

    #[test]
    fn quota_display_names_key_and_sizes() {
        let e = KvError::QuotaExceeded {
            key: "myLibrary".to_string(),
            needed: 120,
            limit: 64,
        };
        let display = format!("{}", e);
        assert!(display.contains("myLibrary"));
        assert!(display.contains("120"));
        assert!(display.contains("64"));
        assert!(e.is_quota_exceeded());
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kv_err: KvError = io_err.into();
        assert!(matches!(kv_err, KvError::Io(_)));
        assert!(!kv_err.is_quota_exceeded());
    }

    #[test]
    fn root_path_invalid_has_source() {
        let e = KvError::RootPathInvalid {
            path: PathBuf::from("/nope"),
            source: std::io::Error::other("missing"),
        };
        assert!(format!("{}", e).contains("/nope"));
        assert!(StdError::source(&e).is_some());
    }
}
