use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::shared::{PackageStore, RequestError, StoreError};

mod consts;
mod requests;
mod util;

pub mod models;

pub use self::requests::{HttpMetadataSource, MetadataSource};
pub use self::util::normalize_name;

use self::models::RegistryMetadata;

/// Error surfaced by a package data lookup.
#[derive(Debug, Error)]
pub enum PackageDataError {
    #[error(transparent)]
    Fetch(#[from] RequestError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/**
    Client for `PyPI` package metadata, backed by a persistent
    recency-bounded store.

    Lookups are fetch-or-populate: a cached record is returned
    without touching the network, and a miss performs exactly one
    remote fetch whose result is stored before being returned.
    Failed fetches are never cached.
*/
#[derive(Debug, Clone)]
pub struct PyPiClient {
    store: PackageStore,
    source: Arc<dyn MetadataSource>,
}

impl PyPiClient {
    #[must_use]
    pub fn new(store: PackageStore) -> Self {
        Self::with_source(store, Arc::new(HttpMetadataSource::new()))
    }

    #[must_use]
    pub fn with_source(store: PackageStore, source: Arc<dyn MetadataSource>) -> Self {
        Self { store, source }
    }

    /**
        Returns the raw registry metadata for the given package name.

        # Errors

        Fails with [`PackageDataError::Fetch`] when the registry is
        unreachable, responds with a non-success status, or returns an
        unparseable body, and with [`PackageDataError::Store`] when the
        backing store cannot be read or written. Nothing is cached on
        failure.
    */
    pub async fn get_package_data(&self, name: &str) -> Result<RegistryMetadata, PackageDataError> {
        let normalized = normalize_name(name);

        if let Some(blob) = self.store.get(&normalized)? {
            debug!("Cache hit for '{normalized}'");
            let meta = RegistryMetadata::from_blob(&blob).map_err(StoreError::Corrupt)?;
            return Ok(meta);
        }

        let result = self.source.fetch(&normalized).await;
        Self::emit_result(&result);
        let meta = result?;

        self.store.put(&normalized, &meta.to_blob().map_err(StoreError::Corrupt)?)?;

        Ok(meta)
    }

    /**
        Destroys the entire metadata cache.

        # Errors

        Fails with [`StoreError`] if the backing file cannot be removed.
    */
    pub fn clear_cache(&self) -> Result<(), StoreError> {
        self.store.clear_all()
    }

    fn emit_result<T>(result: &Result<T, RequestError>) {
        if let Err(e) = &result {
            error!("PyPI error: {e}");
        }
    }
}
