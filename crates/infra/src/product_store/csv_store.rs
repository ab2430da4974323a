use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use scanstock_core::DomainResult;
use scanstock_products::{Catalog, ProductFields, ProductRecord};

use super::csv_file;
use super::r#trait::{ProductStore, StoreResult};

/// CSV-backed product store.
///
/// Holds the catalog in memory behind a single-writer mutex. Every mutating
/// call rewrites the whole file (see [`csv_file::save`]) while still holding
/// the lock, so writes are serialized within the process. If the rewrite
/// fails the in-memory catalog is rolled back and the error is returned.
///
/// Other processes writing the same file are not coordinated with.
#[derive(Debug)]
pub struct CsvProductStore {
    path: PathBuf,
    catalog: Mutex<Catalog>,
}

impl CsvProductStore {
    /// Open the datastore at `path`, loading it if it exists. Parent
    /// directories are created on the first flush.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let catalog = csv_file::load(&path)?;
        info!(path = %path.display(), products = catalog.len(), "opened product datastore");

        Ok(Self {
            path,
            catalog: Mutex::new(catalog),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `op` to the catalog and persist the result before releasing the lock.
    fn mutate<T>(&self, op: impl FnOnce(&mut Catalog) -> DomainResult<T>) -> StoreResult<T> {
        let mut catalog = self.lock();
        let before = catalog.clone();

        let out = op(&mut catalog)?;

        if let Err(e) = csv_file::save(&self.path, &catalog) {
            warn!(path = %self.path.display(), error = %e, "flush failed; rolling back");
            *catalog = before;
            return Err(e);
        }
        debug!(path = %self.path.display(), products = catalog.len(), "flushed datastore");
        Ok(out)
    }
}

impl ProductStore for CsvProductStore {
    fn create(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        let record = self.mutate(|c| c.create(code, fields).cloned())?;
        info!(codigo = code, "product created");
        Ok(record)
    }

    fn get(&self, code: &str) -> StoreResult<ProductRecord> {
        Ok(self.lock().get(code).cloned()?)
    }

    fn update(&self, code: &str, fields: ProductFields) -> StoreResult<ProductRecord> {
        let record = self.mutate(|c| c.update(code, fields).cloned())?;
        info!(codigo = code, "product updated");
        Ok(record)
    }

    fn delete(&self, code: &str) -> StoreResult<()> {
        self.mutate(|c| c.delete(code))?;
        info!(codigo = code, "product deleted");
        Ok(())
    }

    fn list(&self) -> Vec<ProductRecord> {
        self.lock().list().to_vec()
    }

    fn relink(&self, old_code: &str, new_code: &str) -> StoreResult<ProductRecord> {
        let record = self.mutate(|c| c.relink(old_code, new_code).cloned())?;
        info!(old_code, new_code, "product relinked");
        Ok(record)
    }

    fn flush(&self) -> StoreResult<()> {
        let catalog = self.lock();
        csv_file::save(&self.path, &catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_store::StoreError;
    use rust_decimal::Decimal;
    use scanstock_core::DomainError;
    use tempfile::tempdir;

    fn fields(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            category: "Electrónica".to_string(),
            price: Decimal::from(250_000),
            country: None,
            supplier: None,
            stock: 5,
        }
    }

    fn codes(store: &impl ProductStore) -> Vec<String> {
        store.list().iter().map(|r| r.code().to_string()).collect()
    }

    #[test]
    fn open_missing_file_starts_empty_and_does_not_create_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");

        let store = CsvProductStore::open(&path).unwrap();
        assert!(store.list().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn every_mutation_is_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let store = CsvProductStore::open(&path).unwrap();

        store.create("1345364", fields("Radio")).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.starts_with("codigo,nombre,categoria,precio,pais,proveedor,stock\n"));
        assert!(on_disk.contains("1345364,Radio,"));

        store.update("1345364", fields("Radio AM")).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("1345364,Radio AM,"));

        store.delete("1345364").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "codigo,nombre,categoria,precio,pais,proveedor,stock\n"
        );
    }

    #[test]
    fn reopen_sees_same_ordered_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");

        {
            let store = CsvProductStore::open(&path).unwrap();
            for code in ["8412377", "1345364", "5000012"] {
                store.create(code, fields(code)).unwrap();
            }
            store.relink("1345364", "1300064").unwrap();
        }

        let reopened = CsvProductStore::open(&path).unwrap();
        assert_eq!(codes(&reopened), vec!["8412377", "1300064", "5000012"]);
        assert_eq!(reopened.get("1300064").unwrap().name(), "1345364");
    }

    #[test]
    fn duplicate_create_fails_and_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let store = CsvProductStore::open(&path).unwrap();

        store.create("1345364", fields("Radio")).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = store.create("1345364", fields("Otra radio")).unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::DuplicateKey(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let dir = tempdir().unwrap();
        let store = CsvProductStore::open(dir.path().join("products.csv")).unwrap();

        assert_eq!(store.delete("1345364").unwrap_err().as_domain(), Some(&DomainError::NotFound));

        store.create("1345364", fields("Radio")).unwrap();
        store.delete("1345364").unwrap();
        assert_eq!(store.get("1345364").unwrap_err().as_domain(), Some(&DomainError::NotFound));
    }

    #[test]
    fn n_creates_one_delete_leaves_survivors_in_order() {
        let dir = tempdir().unwrap();
        let store = CsvProductStore::open(dir.path().join("products.csv")).unwrap();

        let all = ["1000001", "1000002", "1000003", "1000004"];
        for code in all {
            store.create(code, fields(code)).unwrap();
        }
        store.delete("1000002").unwrap();

        assert_eq!(codes(&store), vec!["1000001", "1000003", "1000004"]);
    }

    #[test]
    fn failed_flush_rolls_back_memory() {
        let dir = tempdir().unwrap();
        // The datastore path is a directory, so the final rename cannot succeed.
        let path = dir.path().join("products.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let store = CsvProductStore {
            path: path.clone(),
            catalog: Mutex::new(Catalog::new()),
        };

        let err = store.create("1345364", fields("Radio")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(store.list().is_empty());
        assert!(!csv_file::temp_path(&path).exists());
    }

    #[test]
    fn rewrite_keeps_columns_added_by_other_tools() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(
            &path,
            "codigo,nombre,categoria,precio,pais,proveedor,stock,imagen\n\
             1345364,Chipa,Alimentos,5000,Paraguay,Proveedor Guaraní S.A.,10,1345364.jpg\n",
        )
        .unwrap();

        let store = CsvProductStore::open(&path).unwrap();
        store.create("8412377", fields("Radio")).unwrap();
        store.update("1345364", fields("Chipa grande")).unwrap();

        let after = std::fs::read_to_string(&path).unwrap();
        let mut lines = after.lines();
        assert_eq!(
            lines.next(),
            Some("codigo,nombre,categoria,precio,pais,proveedor,stock,imagen")
        );
        assert!(lines.next().unwrap().ends_with(",1345364.jpg"));
        assert!(lines.next().unwrap().starts_with("8412377,Radio,"));

        let reopened = CsvProductStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("1345364").unwrap().extras().get("imagen").map(String::as_str),
            Some("1345364.jpg")
        );
    }

    #[test]
    fn reopen_keeps_exact_prices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");

        {
            let store = CsvProductStore::open(&path).unwrap();
            for (code, price) in [("1345364", "12345678901234567.89"), ("8412377", "199999.50")] {
                let f = ProductFields {
                    price: price.parse().unwrap(),
                    ..fields(code)
                };
                store.create(code, f).unwrap();
            }
        }

        let reopened = CsvProductStore::open(&path).unwrap();
        assert_eq!(reopened.get("1345364").unwrap().price().to_string(), "12345678901234567.89");
        assert_eq!(reopened.get("8412377").unwrap().price().to_string(), "199999.50");
    }

    #[test]
    fn concurrent_writers_are_serialized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let store = std::sync::Arc::new(CsvProductStore::open(&path).unwrap());

        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..5u32 {
                        let code = format!("10{:03}{:02}", t, i);
                        store.create(&code, fields(&code)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let reopened = CsvProductStore::open(&path).unwrap();
        let mut on_disk = codes(&reopened);
        assert_eq!(on_disk.len(), 40);
        on_disk.sort();
        on_disk.dedup();
        assert_eq!(on_disk.len(), 40);
        assert_eq!(codes(&reopened), codes(store.as_ref()));
    }

    #[test]
    fn open_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");
        std::fs::write(
            &path,
            "codigo,nombre,categoria,precio,pais,proveedor,stock\n1345364,,Otros,1,P,S,1\n",
        )
        .unwrap();

        assert!(matches!(CsvProductStore::open(&path), Err(StoreError::Corrupt { .. })));
    }
}
