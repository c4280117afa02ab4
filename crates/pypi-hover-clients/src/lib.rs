mod shared;

pub mod pypi;

pub use self::shared::{
    CacheSettings, PackageStore, RequestError, RequestResult, StoreError, cache_db_path,
    cache_dir, settings_path,
};

use self::pypi::PyPiClient;

#[derive(Debug, Clone)]
pub struct Clients {
    pub pypi: PyPiClient,
}

impl Clients {
    #[must_use]
    pub fn new(store: PackageStore) -> Self {
        let pypi = PyPiClient::new(store);

        Self { pypi }
    }
}
