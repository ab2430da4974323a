use std::sync::{PoisonError, RwLock};

use scanstock_products::{Catalog, ProductFields, ProductRecord};

use super::r#trait::{ProductStore, StoreResult};

/// In-memory product store for tests/dev. Nothing is persisted; `flush` is a no-op.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Catalog>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(catalog),
        }
    }
}

impl ProductStore for InMemoryProductStore {
    fn create(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        let mut catalog = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Ok(catalog.create(code, fields).cloned()?)
    }

    fn get(&self, code: &str) -> StoreResult<ProductRecord> {
        let catalog = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(catalog.get(code).cloned()?)
    }

    fn update(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        let mut catalog = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Ok(catalog.update(code, fields).cloned()?)
    }

    fn delete(&self, code: &str) -> StoreResult<()> {
        let mut catalog = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        catalog.delete(code)?;
        Ok(())
    }

    fn list(&self) -> Vec<ProductRecord> {
        let catalog = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        catalog.list().to_vec()
    }

    fn relink(&self, old_code: &str, new_code: &str) -> StoreResult<ProductRecord> {
        let mut catalog = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Ok(catalog.relink(old_code, new_code).cloned()?)
    }

    fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}
