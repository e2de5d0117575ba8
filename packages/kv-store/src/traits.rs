//! The storage adapter trait.

use bytes::Bytes;

use crate::KvError;

/// A key-value byte store addressed by string keys.
///
/// This is the shape of browser-style local storage: a flat namespace, whole
/// values replaced on every write, and writes that may be refused by the
/// medium at any time.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn StorageAdapter>`.
pub trait StorageAdapter {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key (not an error condition).
    /// * `Ok(Some(bytes))` - The stored value.
    /// * `Err(KvError)` - The medium could not be read.
    fn get_item(&self, key: &str) -> Result<Option<Bytes>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: Bytes) -> Result<(), KvError>;

    /// Remove the value under `key`. Removing a missing key succeeds.
    fn remove_item(&mut self, key: &str) -> Result<(), KvError>;

    /// Number of keys currently stored.
    fn len(&self) -> Result<usize, KvError>;

    /// True when no keys are stored.
    fn is_empty(&self) -> Result<bool, KvError> {
        Ok(self.len()? == 0)
    }
}

/// Reject keys that no adapter can store safely.
///
/// Keys must be non-empty and free of control characters. Disk-backed
/// adapters add their own restrictions on top.
pub fn validate_key(key: &str) -> Result<(), KvError> {
    if key.is_empty() {
        return Err(KvError::InvalidKey {
            key: key.to_string(),
            message: "key must not be empty".to_string(),
        });
    }
    if key.chars().any(char::is_control) {
        return Err(KvError::InvalidKey {
            key: key.escape_debug().to_string(),
            message: "key must not contain control characters".to_string(),
        });
    }
    Ok(())
}

// Blanket implementations for references and boxes

impl<T: StorageAdapter + ?Sized> StorageAdapter for &mut T {
    fn get_item(&self, key: &str) -> Result<Option<Bytes>, KvError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: Bytes) -> Result<(), KvError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), KvError> {
        (**self).remove_item(key)
    }

    fn len(&self) -> Result<usize, KvError> {
        (**self).len()
    }
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<Bytes>, KvError> {
        self.as_ref().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: Bytes) -> Result<(), KvError> {
        self.as_mut().set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), KvError> {
        self.as_mut().remove_item(key)
    }

    fn len(&self) -> Result<usize, KvError> {
        self.as_ref().len()
    }
}
