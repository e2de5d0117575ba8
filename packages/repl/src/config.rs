//! Session configuration.
//!
//! Built from command-line arguments in `main.rs`; everything the REPL needs
//! to open storage and set up the terminal lives here.

use std::path::PathBuf;

use bookshelf_catalog::{LoadOptions, DEFAULT_STORAGE_KEY};

/// Where the library is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; nothing survives the session.
    Memory,
    /// One file per key under this directory.
    Disk(PathBuf),
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Disk(path) => write!(f, "disk ({})", path.display()),
        }
    }
}

/// Line editing style for the terminal host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditModePreference {
    Vi,
    Emacs,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no data directory given and no platform default found; pass --data-dir or --memory")]
    NoDataDir,
}

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub backend: StorageBackend,
    pub key: String,
    /// Size cap in bytes for the storage medium.
    pub quota: Option<usize>,
    pub reset_corrupt: bool,
    /// `None` means detect from the environment.
    pub edit_mode: Option<EditModePreference>,
}

impl ReplConfig {
    /// An in-memory session with default settings.
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            key: DEFAULT_STORAGE_KEY.to_string(),
            quota: None,
            reset_corrupt: false,
            edit_mode: None,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            key: self.key.clone(),
            reset_corrupt: self.reset_corrupt,
        }
    }

    /// Pick the backend from the `--memory` flag and an optional directory,
    /// falling back to the platform data directory.
    pub fn resolve_backend(
        memory: bool,
        data_dir: Option<PathBuf>,
    ) -> Result<StorageBackend, ConfigError> {
        if memory {
            return Ok(StorageBackend::Memory);
        }
        data_dir
            .or_else(default_data_dir)
            .map(StorageBackend::Disk)
            .ok_or(ConfigError::NoDataDir)
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self::memory()
    }
}

/// `<data-local-dir>/bookshelf/storage`, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("bookshelf").join("storage"))
}
