//! One-shot availability probe.

use bytes::Bytes;

use crate::StorageAdapter;

/// Key written and removed again by [`storage_available`].
pub const PROBE_KEY: &str = "__storage_test__";

/// Check whether `storage` accepts writes.
///
/// Writes [`PROBE_KEY`] and removes it again. Any failure means the medium is
/// unavailable, with one exception: a quota failure on a medium that already
/// holds entries counts as available, since the store is working and merely
/// full.
///
/// Call this once at startup and keep the answer for the session.
pub fn storage_available<S: StorageAdapter + ?Sized>(storage: &mut S) -> bool {
    let result = storage
        .set_item(PROBE_KEY, Bytes::from_static(PROBE_KEY.as_bytes()))
        .and_then(|()| storage.remove_item(PROBE_KEY));

    match result {
        Ok(()) => true,
        Err(e) if e.is_quota_exceeded() => {
            let has_data = storage.len().is_ok_and(|n| n != 0);
            log::debug!("storage probe hit quota (has data: {}): {}", has_data, e);
            has_data
        }
        Err(e) => {
            log::debug!("storage probe failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStorage;

    #[test]
    fn healthy_storage_is_available() {
        let mut storage = InMemoryStorage::new();
        assert!(storage_available(&mut storage));
    }

    #[test]
    fn probe_leaves_no_trace() {
        let mut storage = InMemoryStorage::with_entries([("myLibrary", "[]")]);
        assert!(storage_available(&mut storage));
        assert!(storage.get_item(PROBE_KEY).unwrap().is_none());
        assert_eq!(storage.len().unwrap(), 1);
    }

    #[test]
    fn disabled_storage_is_unavailable() {
        let mut storage = InMemoryStorage::disabled();
        assert!(!storage_available(&mut storage));
    }

    #[test]
    fn full_storage_with_data_is_available() {
        let mut storage = InMemoryStorage::with_entries([("myLibrary", "[]")]);
        storage.set_quota(Some(storage.used_bytes()));
        assert!(storage_available(&mut storage));
    }

    #[test]
    fn full_empty_storage_is_unavailable() {
        let mut storage = InMemoryStorage::with_quota(0);
        assert!(!storage_available(&mut storage));
    }

    #[test]
    fn works_through_trait_object() {
        let mut boxed: Box<dyn StorageAdapter> = Box::new(InMemoryStorage::new());
        assert!(storage_available(boxed.as_mut()));
    }
}
