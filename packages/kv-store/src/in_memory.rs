//! In-memory storage adapter.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::{validate_key, KvError, StorageAdapter};

/// A process-lifetime key-value store.
///
/// Besides plain storage it can imitate the two ways browser storage
/// misbehaves: a byte quota (keys and values both count) and a disabled
/// medium that refuses every write.
///
/// # Example
///
/// ```rust
/// use bookshelf_kv_store::{Bytes, InMemoryStorage, KvError, StorageAdapter};
///
/// let mut storage = InMemoryStorage::with_quota(8);
/// storage.set_item("k", Bytes::from_static(b"1234")).unwrap();
///
/// let err = storage.set_item("k", Bytes::from_static(b"123456789")).unwrap_err();
/// assert!(err.is_quota_exceeded());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: BTreeMap<String, Bytes>,
    quota: Option<usize>,
    disabled: bool,
}

impl InMemoryStorage {
    /// Create a new empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Create a store whose writes always fail with [`KvError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Create a store with initial entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Bytes>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Set or clear the byte quota. Existing entries are kept even if they
    /// already exceed the new limit.
    pub fn set_quota(&mut self, limit: Option<usize>) {
        self.quota = limit;
    }

    /// Turn write refusal on or off. Entries already present stay readable.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_writable(&self) -> Result<(), KvError> {
        if self.disabled {
            return Err(KvError::Unavailable {
                reason: "in-memory storage is disabled".to_string(),
            });
        }
        Ok(())
    }
}

impl StorageAdapter for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<Bytes>, KvError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: Bytes) -> Result<(), KvError> {
        self.check_writable()?;
        validate_key(key)?;

        if let Some(limit) = self.quota {
            let replaced = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), KvError> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }

    fn len(&self) -> Result<usize, KvError> {
        Ok(self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_write_read() {
        let mut storage = InMemoryStorage::new();

        storage
            .set_item("foo", Bytes::from_static(b"bar"))
            .unwrap();

        assert_eq!(
            storage.get_item("foo").unwrap(),
            Some(Bytes::from_static(b"bar"))
        );
    }

    #[test]
    fn read_nonexistent_returns_none() {
        let storage = InMemoryStorage::new();
        assert!(storage.get_item("nonexistent").unwrap().is_none());
    }

    #[test]
    fn overwrite_works() {
        let mut storage = InMemoryStorage::new();

        storage
            .set_item("value", Bytes::from_static(b"first"))
            .unwrap();
        storage
            .set_item("value", Bytes::from_static(b"second"))
            .unwrap();

        assert_eq!(
            storage.get_item("value").unwrap(),
            Some(Bytes::from_static(b"second"))
        );
        assert_eq!(storage.len().unwrap(), 1);
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        // "k" + 5 bytes = 6, limit 6: replacing with another 5 bytes still fits.
        let mut storage = InMemoryStorage::with_quota(6);
        storage
            .set_item("k", Bytes::from_static(b"12345"))
            .unwrap();
        storage
            .set_item("k", Bytes::from_static(b"abcde"))
            .unwrap();
        assert_eq!(storage.used_bytes(), 6);
    }

    #[test]
    fn quota_rejects_growth_and_keeps_old_value() {
        let mut storage = InMemoryStorage::with_quota(6);
        storage
            .set_item("k", Bytes::from_static(b"12345"))
            .unwrap();

        let err = storage
            .set_item("other", Bytes::from_static(b"x"))
            .unwrap_err();
        assert!(matches!(
            err,
            KvError::QuotaExceeded {
                needed: 12,
                limit: 6,
                ..
            }
        ));
        assert_eq!(
            storage.get_item("k").unwrap(),
            Some(Bytes::from_static(b"12345"))
        );
        assert!(storage.get_item("other").unwrap().is_none());
    }

    #[test]
    fn disabled_rejects_writes() {
        let mut storage = InMemoryStorage::disabled();

        let err = storage
            .set_item("foo", Bytes::from_static(b"bar"))
            .unwrap_err();
        assert!(matches!(err, KvError::Unavailable { .. }));
        assert!(storage.remove_item("foo").is_err());
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn disabled_store_keeps_existing_entries() {
        let mut storage = InMemoryStorage::with_entries([("myLibrary", "[]")]);
        storage.set_disabled(true);

        assert!(storage.set_item("myLibrary", Bytes::from_static(b"[1]")).is_err());
        assert!(storage.remove_item("myLibrary").is_err());
        assert_eq!(
            storage.get_item("myLibrary").unwrap(),
            Some(Bytes::from_static(b"[]"))
        );

        storage.set_disabled(false);
        storage.remove_item("myLibrary").unwrap();
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn with_entries_constructor() {
        let storage = InMemoryStorage::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(storage.len().unwrap(), 2);
        assert_eq!(
            storage.get_item("b").unwrap(),
            Some(Bytes::from_static(b"2"))
        );
    }

    #[test]
    fn empty_key_rejected() {
        let mut storage = InMemoryStorage::new();
        assert!(matches!(
            storage.set_item("", Bytes::new()),
            Err(KvError::InvalidKey { .. })
        ));
    }
}
