//! Ordered, barcode-keyed product collection.
//!
//! `Catalog` is the in-memory half of the product store: it owns the records
//! in storage order and enforces key uniqueness and field validation. It never
//! touches the filesystem; durability is layered on top by the store.

use scanstock_barcode::Barcode;
use scanstock_core::{DomainError, DomainResult};

use crate::product::{ProductFields, ProductRecord};

/// Products in insertion (file) order, unique by barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-ordered records (e.g. rows read from storage),
    /// re-checking field invariants and key uniqueness.
    pub fn from_records(records: Vec<ProductRecord>) -> DomainResult<Self> {
        let mut catalog = Self::with_capacity(records.len());
        for record in records {
            record.validate()?;
            if catalog.contains(record.code()) {
                return Err(DomainError::duplicate_key(record.code()));
            }
            catalog.records.push(record);
        }
        Ok(catalog)
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            records: Vec::with_capacity(n),
        }
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.records.iter().position(|r| r.code() == code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    /// All records in storage order.
    pub fn list(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn get(&self, code: &str) -> DomainResult<&ProductRecord> {
        self.records
            .iter()
            .find(|r| r.code() == code)
            .ok_or(DomainError::NotFound)
    }

    /// Append a new record.
    ///
    /// Fails with `InvalidFormat` for a malformed barcode, `DuplicateKey` if it
    /// is already present, `Validation` for bad fields.
    pub fn create(&mut self, code: &str, fields: ProductFields) -> DomainResult<&ProductRecord> {
        let barcode = Barcode::parse(code)?;
        if self.contains(code) {
            return Err(DomainError::duplicate_key(code));
        }

        let record = ProductRecord::new(barcode, fields)?;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Replace every mutable field of an existing record. The key, the
    /// record's position and its unmanaged columns are unchanged.
    pub fn update(&mut self, code: &str, fields: ProductFields) -> DomainResult<&ProductRecord> {
        let idx = self.position(code).ok_or(DomainError::NotFound)?;
        let current = &self.records[idx];
        let record = ProductRecord::new(current.barcode().clone(), fields)?
            .with_extras(current.extras().clone());
        self.records[idx] = record;
        Ok(&self.records[idx])
    }

    /// Remove a record, returning it.
    pub fn delete(&mut self, code: &str) -> DomainResult<ProductRecord> {
        let idx = self.position(code).ok_or(DomainError::NotFound)?;
        Ok(self.records.remove(idx))
    }

    /// Move a record to a new barcode in place. Relinking a code to itself is
    /// a no-op.
    pub fn relink(&mut self, old_code: &str, new_code: &str) -> DomainResult<&ProductRecord> {
        if old_code == new_code {
            return self.get(old_code);
        }

        let barcode = Barcode::parse(new_code)?;
        let idx = self.position(old_code).ok_or(DomainError::NotFound)?;
        if self.contains(new_code) {
            return Err(DomainError::duplicate_key(new_code));
        }

        let record = self.records[idx].clone().with_barcode(barcode);
        self.records[idx] = record;
        Ok(&self.records[idx])
    }
}

impl IntoIterator for Catalog {
    type Item = ProductRecord;
    type IntoIter = std::vec::IntoIter<ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
