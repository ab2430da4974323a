//! Decode/encode between raw digit strings and structured barcodes.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use scanstock_core::{DomainError, DomainResult};

use crate::tables::{UNKNOWN_LABEL, country_name, supplier_name};
use crate::{BARCODE_LEN, COUNTRY_LEN, PRODUCT_LEN, SUPPLIER_LEN};

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// A validated 7-digit barcode.
///
/// Construction always goes through [`Barcode::parse`], so any value of this
/// type is guaranteed to be exactly [`BARCODE_LEN`] ASCII digits. Serializes
/// as the bare digit string and rejects malformed input on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Parse a raw code, failing with `InvalidFormat` unless it is 7 digits.
    pub fn parse(code: &str) -> DomainResult<Self> {
        validate(code)?;
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..COUNTRY_LEN]
    }

    pub fn product_code(&self) -> &str {
        &self.0[COUNTRY_LEN..COUNTRY_LEN + PRODUCT_LEN]
    }

    pub fn supplier_code(&self) -> &str {
        &self.0[COUNTRY_LEN + PRODUCT_LEN..]
    }

    /// Structured breakdown with table labels resolved.
    pub fn decode(&self) -> DecodedBarcode {
        let country_code = self.country_code();
        let supplier_code = self.supplier_code();
        DecodedBarcode {
            country_code: country_code.to_string(),
            country_name: country_name(country_code).unwrap_or(UNKNOWN_LABEL).to_string(),
            product_code: self.product_code().to_string(),
            supplier_code: supplier_code.to_string(),
            supplier_name: supplier_name(supplier_code).unwrap_or(UNKNOWN_LABEL).to_string(),
        }
    }
}

impl core::fmt::Display for Barcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Barcode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Barcode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<Barcode> for String {
    fn from(value: Barcode) -> Self {
        value.0
    }
}

/// Decoded barcode: raw segments plus their resolved labels.
///
/// Field names on the wire follow the scanner page's JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBarcode {
    #[serde(rename = "pais_codigo")]
    pub country_code: String,
    #[serde(rename = "pais_nombre")]
    pub country_name: String,
    #[serde(rename = "producto_id")]
    pub product_code: String,
    #[serde(rename = "proveedor_codigo")]
    pub supplier_code: String,
    #[serde(rename = "proveedor_nombre")]
    pub supplier_name: String,
}

impl DecodedBarcode {
    /// Both country and supplier segments resolved in their tables.
    pub fn is_known(&self) -> bool {
        self.country_name != UNKNOWN_LABEL && self.supplier_name != UNKNOWN_LABEL
    }

    /// Re-encode the segments into the 7-digit code.
    pub fn encode(&self) -> DomainResult<String> {
        encode(&self.country_code, &self.product_code, &self.supplier_code)
    }
}

/// Check that `code` is exactly 7 ASCII digits.
pub fn validate(code: &str) -> DomainResult<()> {
    if is_digits(code, BARCODE_LEN) {
        Ok(())
    } else {
        Err(DomainError::invalid_format(format!(
            "expected {BARCODE_LEN} digits, got {code:?}"
        )))
    }
}

/// Decode a raw code into its segments and labels.
///
/// Segments missing from the lookup tables yield [`UNKNOWN_LABEL`] rather
/// than an error.
pub fn decode(code: &str) -> DomainResult<DecodedBarcode> {
    Barcode::parse(code).map(|b| b.decode())
}

/// Concatenate segments into a barcode.
///
/// Only width and charset are checked; table membership is not, so codes for
/// countries or suppliers outside the tables can still be generated.
pub fn encode(country_code: &str, product_code: &str, supplier_code: &str) -> DomainResult<String> {
    for (name, value, width) in [
        ("country", country_code, COUNTRY_LEN),
        ("product", product_code, PRODUCT_LEN),
        ("supplier", supplier_code, SUPPLIER_LEN),
    ] {
        if !is_digits(value, width) {
            return Err(DomainError::invalid_segment(format!(
                "{name} segment must be {width} digits, got {value:?}"
            )));
        }
    }

    let mut code = String::with_capacity(BARCODE_LEN);
    code.push_str(country_code);
    code.push_str(product_code);
    code.push_str(supplier_code);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_resolves_known_segments() {
        let d = decode("1345364").unwrap();
        assert_eq!(d.country_code, "13");
        assert_eq!(d.country_name, "Paraguay");
        assert_eq!(d.product_code, "453");
        assert_eq!(d.supplier_code, "64");
        assert_eq!(d.supplier_name, "Proveedor Guaraní S.A.");
        assert!(d.is_known());
    }

    #[test]
    fn decode_unknown_segments_degrade_to_label() {
        let d = decode("9999999").unwrap();
        assert_eq!(d.country_name, UNKNOWN_LABEL);
        assert_eq!(d.supplier_name, UNKNOWN_LABEL);
        assert!(!d.is_known());
    }

    #[test]
    fn decode_keeps_namespaces_apart() {
        // 45 is Argentina as a country and TechPlus as a supplier.
        let d = decode("4500045").unwrap();
        assert_eq!(d.country_name, "Argentina");
        assert_eq!(d.supplier_name, "TechPlus Importaciones");
    }

    #[test]
    fn decode_rejects_wrong_length() {
        for code in ["", "134536", "13453641", "1345364 "] {
            assert!(matches!(decode(code), Err(DomainError::InvalidFormat(_))), "{code:?}");
        }
    }

    #[test]
    fn decode_rejects_non_digits() {
        for code in ["13453A4", "-345364", "13 5364", "１３４５３６４"] {
            assert!(matches!(decode(code), Err(DomainError::InvalidFormat(_))), "{code:?}");
        }
    }

    #[test]
    fn encode_concatenates_segments() {
        assert_eq!(encode("13", "453", "64").unwrap(), "1345364");
    }

    #[test]
    fn encode_does_not_check_tables() {
        assert_eq!(encode("99", "000", "99").unwrap(), "9900099");
    }

    #[test]
    fn encode_rejects_bad_segments() {
        let cases = [
            ("1", "453", "64"),
            ("13", "45", "64"),
            ("13", "453", "640"),
            ("1a", "453", "64"),
            ("13", "4 3", "64"),
            ("13", "453", ""),
        ];
        for (c, p, s) in cases {
            assert!(
                matches!(encode(c, p, s), Err(DomainError::InvalidSegment(_))),
                "{c:?} {p:?} {s:?}"
            );
        }
    }

    #[test]
    fn barcode_exposes_segments() {
        let b: Barcode = "8412377".parse().unwrap();
        assert_eq!(b.country_code(), "84");
        assert_eq!(b.product_code(), "123");
        assert_eq!(b.supplier_code(), "77");
        assert_eq!(b.to_string(), "8412377");
    }

    #[test]
    fn barcode_serde_is_a_plain_string() {
        let b = Barcode::parse("1345364").unwrap();
        assert_eq!(serde_json::to_string(&b).unwrap(), "\"1345364\"");

        let back: Barcode = serde_json::from_str("\"1345364\"").unwrap();
        assert_eq!(back, b);

        assert!(serde_json::from_str::<Barcode>("\"13A\"").is_err());
    }

    #[test]
    fn decoded_json_uses_scanner_field_names() {
        let v = serde_json::to_value(decode("5000012").unwrap()).unwrap();
        assert_eq!(v["pais_codigo"], "50");
        assert_eq!(v["pais_nombre"], "Brasil");
        assert_eq!(v["producto_id"], "000");
        assert_eq!(v["proveedor_codigo"], "12");
        assert_eq!(v["proveedor_nombre"], "Distribuidora Mercosur");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: decode then encode reproduces any 7-digit code.
            #[test]
            fn decode_encode_round_trip(code in "[0-9]{7}") {
                let decoded = decode(&code).unwrap();
                prop_assert_eq!(decoded.encode().unwrap(), code);
            }

            /// Property: anything that is not exactly 7 digits is rejected.
            #[test]
            fn decode_rejects_non_barcodes(code in "[0-9]{0,6}|[0-9]{8,12}|[0-9]{0,6}[^0-9][0-9]{0,6}") {
                prop_assume!(!(code.len() == 7 && code.bytes().all(|b| b.is_ascii_digit())));
                prop_assert!(matches!(decode(&code), Err(DomainError::InvalidFormat(_))));
            }

            /// Property: decode is deterministic.
            #[test]
            fn decode_is_deterministic(code in "[0-9]{7}") {
                prop_assert_eq!(decode(&code).unwrap(), decode(&code).unwrap());
            }
        }
    }
}
