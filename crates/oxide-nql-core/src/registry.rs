//! Provider registry.
//!
//! Backends are registered explicitly under a provider tag. A registry can
//! be used as a plain value or installed once as the process-wide registry.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::config::ProviderSettings;
use crate::error::{BackendError, QueryError, Result};
use crate::execution::{BucketManager, DatabaseManager};

/// Creates an entity backend from its settings.
pub type DatabaseFactory = Arc<
    dyn Fn(&ProviderSettings) -> core::result::Result<Box<dyn DatabaseManager>, BackendError>
        + Send
        + Sync,
>;

/// Creates a key-value backend from its settings.
pub type BucketFactory = Arc<
    dyn Fn(&ProviderSettings) -> core::result::Result<Box<dyn BucketManager>, BackendError>
        + Send
        + Sync,
>;

static GLOBAL_REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();
static EMPTY_REGISTRY: ProviderRegistry = ProviderRegistry::new();

/// Maps provider tags to backend factories.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    databases: BTreeMap<String, DatabaseFactory>,
    buckets: BTreeMap<String, BucketFactory>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            databases: BTreeMap::new(),
            buckets: BTreeMap::new(),
        }
    }

    /// Registers an entity backend factory under `tag`, replacing any
    /// previous one.
    #[must_use]
    pub fn with_database<F>(mut self, tag: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ProviderSettings) -> core::result::Result<Box<dyn DatabaseManager>, BackendError>
            + Send
            + Sync
            + 'static,
    {
        self.databases.insert(tag.into(), Arc::new(factory));
        self
    }

    /// Registers a key-value backend factory under `tag`, replacing any
    /// previous one.
    #[must_use]
    pub fn with_bucket<F>(mut self, tag: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&ProviderSettings) -> core::result::Result<Box<dyn BucketManager>, BackendError>
            + Send
            + Sync
            + 'static,
    {
        self.buckets.insert(tag.into(), Arc::new(factory));
        self
    }

    /// Creates the entity backend named by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownProvider`] for an unregistered tag and
    /// [`QueryError::Backend`] if the factory fails.
    pub fn database(&self, settings: &ProviderSettings) -> Result<Box<dyn DatabaseManager>> {
        let factory = self
            .databases
            .get(&settings.provider)
            .ok_or_else(|| QueryError::UnknownProvider(settings.provider.clone()))?;
        debug!(provider = %settings.provider, "creating database manager");
        Ok(factory(settings)?)
    }

    /// Creates the key-value backend named by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownProvider`] for an unregistered tag and
    /// [`QueryError::Backend`] if the factory fails.
    pub fn bucket(&self, settings: &ProviderSettings) -> Result<Box<dyn BucketManager>> {
        let factory = self
            .buckets
            .get(&settings.provider)
            .ok_or_else(|| QueryError::UnknownProvider(settings.provider.clone()))?;
        debug!(provider = %settings.provider, "creating bucket manager");
        Ok(factory(settings)?)
    }

    /// Returns the entity backend tags, sorted.
    pub fn database_tags(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }

    /// Returns the key-value backend tags, sorted.
    pub fn bucket_tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Installs this registry as the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::RegistryAlreadyInstalled`] if a registry was
    /// installed before; the installed registry is left unchanged.
    pub fn install(self) -> Result<&'static Self> {
        let mut installed = false;
        let registry = GLOBAL_REGISTRY.get_or_init(|| {
            installed = true;
            self
        });
        if !installed {
            return Err(QueryError::RegistryAlreadyInstalled);
        }
        info!(
            databases = registry.databases.len(),
            buckets = registry.buckets.len(),
            "provider registry installed"
        );
        Ok(registry)
    }

    /// Returns the process-wide registry, empty until one is installed.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get().unwrap_or(&EMPTY_REGISTRY)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("databases", &self.databases.keys().collect::<Vec<_>>())
            .field("buckets", &self.buckets.keys().collect::<Vec<_>>())
            .finish()
    }
}
