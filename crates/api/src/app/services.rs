use std::sync::Arc;

use scanstock_infra::{AppConfig, CsvProductStore, InMemoryProductStore, ProductStore, StoreResult};

/// Shared handles available to every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn ProductStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Services backed by a non-persistent store (tests/dev).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }

    /// Run `op` against the store on tokio's blocking pool. The CSV store
    /// rewrites and fsyncs the datastore while holding its lock.
    pub async fn run_blocking<T, F>(&self, op: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&dyn ProductStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref())).await
    }
}

/// Open the CSV datastore named in `config`.
pub fn build_services(config: &AppConfig) -> StoreResult<AppServices> {
    let store = CsvProductStore::open(&config.data_file)?;
    Ok(AppServices::new(Arc::new(store)))
}
