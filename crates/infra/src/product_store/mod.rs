//! Product persistence boundary.
//!
//! Every store exposes the same barcode-keyed CRUD contract over an ordered
//! [`Catalog`](scanstock_products::Catalog). `CsvProductStore` treats the whole
//! collection as the unit of durability: each mutation rewrites the full CSV
//! file before it is acknowledged.

pub mod csv_file;
pub mod csv_store;
pub mod in_memory;
pub mod r#trait;

pub use csv_store::CsvProductStore;
pub use in_memory::InMemoryProductStore;
pub use r#trait::{ProductStore, StoreError, StoreResult};
