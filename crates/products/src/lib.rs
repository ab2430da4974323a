//! Products domain module.
//!
//! This crate contains the product record model and the ordered catalog
//! collection, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage). Barcode validation is delegated to `scanstock-barcode`.

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{CATEGORIES, POINTS_PRICE_UNIT, ProductFields, ProductRecord};
