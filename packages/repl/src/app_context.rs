//! Application context for the REPL.
//!
//! Owns the [`Catalog`] for the session together with a description of the
//! storage it was opened on. Commands get a `&mut AppContext` and nothing
//! else.

use bookshelf_catalog::{Catalog, CatalogError, LoadOptions};
use bookshelf_kv_store::{InMemoryStorage, KvError, LocalDiskStorage, StorageAdapter};

use crate::config::{ReplConfig, StorageBackend};

#[derive(thiserror::Error, Debug)]
pub enum ContextError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] KvError),
}

pub type DynStorage = Box<dyn StorageAdapter>;

pub struct AppContext {
    catalog: Catalog<DynStorage>,
    backend: StorageBackend,
}

impl AppContext {
    /// Open the configured storage and load the library from it.
    pub fn new(config: &ReplConfig) -> Result<Self, ContextError> {
        let storage: DynStorage = match &config.backend {
            StorageBackend::Memory => {
                let mut storage = InMemoryStorage::new();
                storage.set_quota(config.quota);
                Box::new(storage)
            }
            StorageBackend::Disk(path) => {
                Box::new(LocalDiskStorage::create(path.clone())?.with_quota(config.quota))
            }
        };
        log::info!("opening library on {}", config.backend);

        Self::with_storage(storage, config.load_options(), config.backend.clone())
    }

    /// Load the library from an already opened adapter.
    pub fn with_storage(
        storage: DynStorage,
        options: LoadOptions,
        backend: StorageBackend,
    ) -> Result<Self, ContextError> {
        Ok(Self {
            catalog: Catalog::open(storage, options)?,
            backend,
        })
    }

    pub fn catalog(&self) -> &Catalog<DynStorage> {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog<DynStorage> {
        &mut self.catalog
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_catalog::{BookFields, DEFAULT_STORAGE_KEY};

    #[test]
    fn memory_context_starts_empty() {
        let ctx = AppContext::new(&ReplConfig::memory()).unwrap();
        assert!(ctx.catalog().library().is_empty());
        assert!(ctx.catalog().library().storage_available());
        assert_eq!(ctx.backend(), &StorageBackend::Memory);
    }

    #[test]
    fn tiny_memory_quota_disables_persistence() {
        let config = ReplConfig {
            quota: Some(0),
            ..ReplConfig::memory()
        };
        let ctx = AppContext::new(&config).unwrap();
        assert!(!ctx.catalog().library().storage_available());
    }

    #[test]
    fn disk_context_persists_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReplConfig {
            backend: StorageBackend::Disk(dir.path().join("storage")),
            ..ReplConfig::memory()
        };

        {
            let mut ctx = AppContext::new(&config).unwrap();
            ctx.catalog_mut().add_book(BookFields {
                title: "Dune".to_string(),
                ..BookFields::default()
            });
        }

        let ctx = AppContext::new(&config).unwrap();
        assert_eq!(ctx.catalog().library().books()[0].title(), "Dune");
        assert!(dir.path().join("storage").join(DEFAULT_STORAGE_KEY).is_file());
    }
}
