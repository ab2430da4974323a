use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use scanstock_barcode::{Barcode, DecodedBarcode};
use scanstock_core::{DomainError, DomainResult};

/// Suggested categories offered to the creator page. Advisory only: any
/// non-blank category is accepted.
pub const CATEGORIES: &[&str] = &[
    "Bebidas",
    "Alimentos",
    "Lácteos",
    "Calzado",
    "Electrónica",
    "Limpieza",
    "Higiene",
    "Otros",
];

/// Price (in guaraníes) worth one loyalty point.
pub const POINTS_PRICE_UNIT: u64 = 100;

/// Mutable attributes of a product, as supplied by a caller.
///
/// `country` / `supplier` are optional: when absent or blank they are derived
/// from the barcode's table labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub country: Option<String>,
    pub supplier: Option<String>,
    pub stock: u64,
}

/// A product record keyed by its barcode.
///
/// Serialized field names and their order are the on-disk CSV contract:
/// `codigo,nombre,categoria,precio,pais,proveedor,stock`. The price always
/// travels as a decimal string so its scale survives storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "codigo")]
    barcode: Barcode,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::str")]
    price: Decimal,
    #[serde(rename = "pais")]
    country: String,
    #[serde(rename = "proveedor")]
    supplier: String,
    stock: u64,
    /// Datastore columns this service does not manage (e.g. `imagen`), kept
    /// verbatim across rewrites.
    #[serde(skip)]
    extras: BTreeMap<String, String>,
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn label_or(value: Option<&str>, derived: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => derived.to_string(),
    }
}

impl ProductRecord {
    /// Build a validated record. Blank `country` / `supplier` fall back to the
    /// labels decoded from `barcode`.
    pub fn new(barcode: Barcode, fields: ProductFields) -> DomainResult<Self> {
        let decoded = barcode.decode();
        let record = Self {
            name: required("nombre", &fields.name)?,
            category: required("categoria", &fields.category)?,
            price: fields.price,
            country: label_or(fields.country.as_deref(), &decoded.country_name),
            supplier: label_or(fields.supplier.as_deref(), &decoded.supplier_name),
            stock: fields.stock,
            barcode,
            extras: BTreeMap::new(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Re-check invariants on a record that did not come through [`Self::new`]
    /// (e.g. one deserialized from storage).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("nombre cannot be empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("categoria cannot be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation("precio cannot be negative"));
        }
        Ok(())
    }

    pub fn barcode(&self) -> &Barcode {
        &self.barcode
    }

    pub fn code(&self) -> &str {
        self.barcode.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn decoded(&self) -> DecodedBarcode {
        self.barcode.decode()
    }

    /// Loyalty points this product is worth: one per [`POINTS_PRICE_UNIT`].
    pub fn points(&self) -> u64 {
        (self.price / Decimal::from(POINTS_PRICE_UNIT))
            .trunc()
            .to_u64()
            .unwrap_or(0)
    }

    /// Current mutable attributes, with labels made explicit.
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            country: Some(self.country.clone()),
            supplier: Some(self.supplier.clone()),
            stock: self.stock,
        }
    }

    /// Unmanaged columns by header name.
    pub fn extras(&self) -> &BTreeMap<String, String> {
        &self.extras
    }

    pub fn with_extras(mut self, extras: BTreeMap<String, String>) -> Self {
        self.extras = extras;
        self
    }

    /// Same record under a different key.
    pub(crate) fn with_barcode(mut self, barcode: Barcode) -> Self {
        self.barcode = barcode;
        self
    }
}
