//! Disk-backed storage adapter.
//!
//! Each key is one file directly under the root directory; the file holds the
//! value bytes unchanged. Writes go to a hidden temporary file first and are
//! renamed into place, so a crash never leaves a half-written value behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::{validate_key, KvError, StorageAdapter};

/// A key-value store rooted at a directory on the local file system.
pub struct LocalDiskStorage {
    root: PathBuf,
    quota: Option<usize>,
}

impl LocalDiskStorage {
    /// Open an existing, writable directory as a store.
    pub fn new(root: PathBuf) -> Result<LocalDiskStorage, KvError> {
        let attr = fs::metadata(&root).map_err(|source| KvError::RootPathInvalid {
            path: root.clone(),
            source,
        })?;

        if !attr.is_dir() {
            return Err(KvError::RootPathInvalid {
                path: root,
                source: io::Error::other("Root path must be a directory."),
            });
        }

        if attr.permissions().readonly() {
            return Err(KvError::RootPathInvalid {
                path: root,
                source: io::Error::other("Root directory must be writable"),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(LocalDiskStorage { root, quota: None }),
            Err(source) => Err(KvError::RootPathInvalid { path: root, source }),
        }
    }

    /// Create the directory (and parents) if needed, then open it.
    pub fn create(root: PathBuf) -> Result<LocalDiskStorage, KvError> {
        fs::create_dir_all(&root).map_err(|source| KvError::RootPathInvalid {
            path: root.clone(),
            source,
        })?;
        Self::new(root)
    }

    /// Limit the total size of keys plus values to `limit` bytes.
    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.quota = limit;
        self
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_to_file_path(&self, key: &str) -> Result<PathBuf, KvError> {
        validate_key(key)?;
        if key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(KvError::InvalidKey {
                key: key.to_string(),
                message: "disk keys must not start with '.' or contain path separators"
                    .to_string(),
            });
        }
        Ok(self.root.join(key))
    }

    /// Stored entries as (key, value size) pairs. Hidden files are skipped.
    fn entries(&self) -> Result<Vec<(String, u64)>, KvError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            entries.push((name, entry.metadata()?.len()));
        }
        Ok(entries)
    }

    fn check_quota(&self, key: &str, value: &Bytes) -> Result<(), KvError> {
        let Some(limit) = self.quota else {
            return Ok(());
        };

        let others: usize = self
            .entries()?
            .into_iter()
            .filter(|(name, _)| name != key)
            .map(|(name, size)| name.len() + size as usize)
            .sum();
        let needed = others + key.len() + value.len();
        if needed > limit {
            return Err(KvError::QuotaExceeded {
                key: key.to_string(),
                needed,
                limit,
            });
        }
        Ok(())
    }
}

impl StorageAdapter for LocalDiskStorage {
    fn get_item(&self, key: &str) -> Result<Option<Bytes>, KvError> {
        let file_path = self.key_to_file_path(key)?;
        log::debug!("Reading {}...", file_path.display());

        match fs::read(&file_path) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: Bytes) -> Result<(), KvError> {
        let file_path = self.key_to_file_path(key)?;
        self.check_quota(key, &value)?;

        log::debug!("Writing {}...", file_path.display());

        let tmp_path = self.root.join(format!(".{}.tmp", key));
        let mut f = fs::File::create(&tmp_path).map_err(|source| match source.kind() {
            io::ErrorKind::PermissionDenied => KvError::Unavailable {
                reason: format!("cannot write {}: {}", tmp_path.display(), source),
            },
            _ => KvError::Io(source),
        })?;
        let written = f
            .write_all(&value)
            .and_then(|()| f.sync_all())
            .and_then(|()| fs::rename(&tmp_path, &file_path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                log::debug!("Leaving {}: {}", tmp_path.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), KvError> {
        let file_path = self.key_to_file_path(key)?;
        log::debug!("Removing {}...", file_path.display());

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn len(&self) -> Result<usize, KvError> {
        Ok(self.entries()?.len())
    }
}

#[cfg(test)]
mod local_disk_storage_tests {
    use super::*;

    #[test]
    fn works() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();

        storage
            .set_item("myLibrary", Bytes::from_static(b"[]"))
            .unwrap();
        assert_eq!(
            storage.get_item("myLibrary").unwrap(),
            Some(Bytes::from_static(b"[]"))
        );
        assert_eq!(storage.len().unwrap(), 1);

        // Overwrite keeps a single entry.
        storage
            .set_item("myLibrary", Bytes::from_static(b"[1]"))
            .unwrap();
        assert_eq!(storage.len().unwrap(), 1);

        storage.remove_item("myLibrary").unwrap();
        assert!(storage.get_item("myLibrary").unwrap().is_none());
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();
            storage
                .set_item("shelf", Bytes::from_static(b"persisted"))
                .unwrap();
        }

        let storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();
        assert_eq!(
            storage.get_item("shelf").unwrap(),
            Some(Bytes::from_static(b"persisted"))
        );
    }

    #[test]
    fn reads_files_written_outside_the_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("example"), b"\"Hello, world!\"").unwrap();

        let storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();
        assert_eq!(
            storage.get_item("example").unwrap(),
            Some(Bytes::from_static(b"\"Hello, world!\""))
        );
    }

    #[test]
    fn create_makes_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let storage = LocalDiskStorage::create(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert!(storage.is_empty().unwrap());
    }

    #[test]
    fn new_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            LocalDiskStorage::new(missing),
            Err(KvError::RootPathInvalid { .. })
        ));
    }

    #[test]
    fn new_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, b"x").unwrap();
        assert!(matches!(
            LocalDiskStorage::new(file),
            Err(KvError::RootPathInvalid { .. })
        ));
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();

        for key in ["../escape", "a/b", ".hidden", ""] {
            assert!(
                matches!(
                    storage.set_item(key, Bytes::from_static(b"x")),
                    Err(KvError::InvalidKey { .. })
                ),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn quota_limits_total_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalDiskStorage::new(PathBuf::from(dir.path()))
            .unwrap()
            .with_quota(Some(10));

        // "k" + 4 bytes = 5
        storage.set_item("k", Bytes::from_static(b"1234")).unwrap();
        let err = storage
            .set_item("j", Bytes::from_static(b"12345"))
            .unwrap_err();
        assert!(err.is_quota_exceeded());
        assert!(storage.get_item("j").unwrap().is_none());

        // Replacing an existing key only counts the new value.
        storage
            .set_item("k", Bytes::from_static(b"123456789"))
            .unwrap();
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("book");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("inside"), b"x").unwrap();

        let mut storage = LocalDiskStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(storage.set_item("book", Bytes::from_static(b"[]")).is_err());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("book")]);
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = LocalDiskStorage::new(PathBuf::from(dir.path())).unwrap();
        assert!(storage.remove_item("ghost").is_ok());
    }
}
