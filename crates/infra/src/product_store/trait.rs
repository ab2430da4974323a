use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use scanstock_core::DomainError;
use scanstock_products::{ProductFields, ProductRecord};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Deterministic failure from the catalog (bad barcode, duplicate, not found, ...).
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The file parsed but its rows break a catalog invariant.
    #[error("corrupt datastore {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// The domain error behind this failure, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Barcode-keyed product store.
///
/// Lookups take the raw barcode string: a malformed code can never be stored,
/// so `get`/`update`/`delete` with one simply yield `NotFound`.
///
/// Mutating calls are durable when they return `Ok`; on error the store's
/// visible state is unchanged.
pub trait ProductStore: Send + Sync {
    /// Append a new record. `InvalidFormat` / `DuplicateKey` / `Validation` on rejection.
    fn create(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord>;

    fn get(&self, code: &str) -> StoreResult<ProductRecord>;

    /// Replace all mutable fields of an existing record.
    fn update(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord>;

    fn delete(&self, code: &str) -> StoreResult<()>;

    /// All records in storage order.
    fn list(&self) -> Vec<ProductRecord>;

    /// Change the barcode of an existing record, keeping its position.
    fn relink(&self, old_code: &str, new_code: &str) -> StoreResult<ProductRecord>;

    /// Persist the whole collection.
    fn flush(&self) -> StoreResult<()>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn create(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        (**self).create(code, fields)
    }

    fn get(&self, code: &str) -> StoreResult<ProductRecord> {
        (**self).get(code)
    }

    fn update(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        (**self).update(code, fields)
    }

    fn delete(&self, code: &str) -> StoreResult<()> {
        (**self).delete(code)
    }

    fn list(&self) -> Vec<ProductRecord> {
        (**self).list()
    }

    fn relink(&self, old_code: &str, new_code: &str) -> StoreResult<ProductRecord> {
        (**self).relink(old_code, new_code)
    }

    fn flush(&self) -> StoreResult<()> {
        (**self).flush()
    }
}
