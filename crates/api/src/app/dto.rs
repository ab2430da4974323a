use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use scanstock_barcode::{COUNTRIES, DecodedBarcode, SUPPLIERS};
use scanstock_products::{CATEGORIES, ProductFields, ProductRecord};

// -------------------------
// Request DTOs
// -------------------------

/// Mutable product fields as sent by the creator/inventory pages.
///
/// `precio` and `stock` accept JSON numbers or numeric strings (HTML forms
/// send strings). A string price is taken digit for digit; a JSON number is
/// limited to what an `f64` can hold. `pais` / `proveedor` may be omitted to
/// derive them from the barcode.
#[derive(Debug, Deserialize)]
pub struct ProductFieldsRequest {
    pub nombre: String,
    pub categoria: String,
    #[serde(deserialize_with = "decimal_number_or_text")]
    pub precio: Decimal,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub proveedor: Option<String>,
    #[serde(deserialize_with = "non_negative_integer")]
    pub stock: u64,
}

impl ProductFieldsRequest {
    pub fn into_fields(self) -> ProductFields {
        ProductFields {
            name: self.nombre,
            category: self.categoria,
            price: self.precio,
            country: self.pais,
            supplier: self.proveedor,
            stock: self.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub codigo: String,
    #[serde(flatten)]
    pub fields: ProductFieldsRequest,
}

#[derive(Debug, Deserialize)]
pub struct RelinkProductRequest {
    pub old_code: String,
    pub new_code: String,
}

#[derive(Debug, Deserialize)]
pub struct EncodeBarcodeRequest {
    pub pais: String,
    pub producto: String,
    pub proveedor: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

fn non_negative_integer<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a non-negative integer, got {s:?}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn decimal_number_or_text<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match DecimalInput::deserialize(deserializer)? {
        DecimalInput::Integer(n) => return Ok(Decimal::from(n)),
        // Shortest round-trip rendering, so 1500.5 stays 1500.5.
        DecimalInput::Float(f) => f.to_string(),
        DecimalInput::Text(s) => s.trim().to_string(),
    };
    text.parse::<Decimal>()
        .map_err(|_| de::Error::custom(format!("expected a decimal number, got {text:?}")))
}

// -------------------------
// Response DTOs
// -------------------------

/// Record plus the computed fields the scanner page shows.
#[derive(Debug, Serialize)]
pub struct ProductDetail<'a> {
    #[serde(flatten)]
    pub product: &'a ProductRecord,
    pub puntos: u64,
    pub decoded: serde_json::Value,
}

impl<'a> ProductDetail<'a> {
    pub fn new(product: &'a ProductRecord) -> Self {
        Self {
            product,
            puntos: product.points(),
            decoded: decoded_to_json(&product.decoded()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RelinkResponse<'a> {
    pub old_code: &'a str,
    pub new_code: &'a str,
    pub product: &'a ProductRecord,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn decoded_to_json(d: &DecodedBarcode) -> serde_json::Value {
    serde_json::json!({
        "pais_codigo": d.country_code,
        "pais_nombre": d.country_name,
        "producto_id": d.product_code,
        "proveedor_codigo": d.supplier_code,
        "proveedor_nombre": d.supplier_name,
        "conocido": d.is_known(),
    })
}

fn table_to_json(table: &[(&str, &str)]) -> serde_json::Value {
    table
        .iter()
        .map(|(code, name)| (code.to_string(), serde_json::Value::from(*name)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

/// Lookup tables and suggested categories for the creator page.
pub fn catalog_to_json() -> serde_json::Value {
    serde_json::json!({
        "paises": table_to_json(COUNTRIES),
        "proveedores": table_to_json(SUPPLIERS),
        "categorias": CATEGORIES,
    })
}
