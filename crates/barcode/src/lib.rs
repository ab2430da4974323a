//! Barcode codec.
//!
//! A barcode is a fixed-width 7-digit string laid out as
//! `country(2) + product(3) + supplier(2)`. This crate parses, validates and
//! formats those strings and resolves the country/supplier segments against
//! static lookup tables. Pure and deterministic (no IO, no state).

pub mod codec;
pub mod tables;

pub use codec::{Barcode, DecodedBarcode, decode, encode, validate};
pub use tables::{COUNTRIES, SUPPLIERS, UNKNOWN_LABEL, country_name, supplier_name};

/// Total number of digits in a barcode.
pub const BARCODE_LEN: usize = COUNTRY_LEN + PRODUCT_LEN + SUPPLIER_LEN;

/// Width of the country segment.
pub const COUNTRY_LEN: usize = 2;

/// Width of the product segment.
pub const PRODUCT_LEN: usize = 3;

/// Width of the supplier segment.
pub const SUPPLIER_LEN: usize = 2;
