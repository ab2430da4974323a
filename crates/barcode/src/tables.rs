//! Static country and supplier lookup tables.
//!
//! The two tables are independent namespaces: the same two digits may name a
//! country in one and a supplier in the other (`45` does).

/// Label reported for a segment that is not present in its table.
pub const UNKNOWN_LABEL: &str = "Desconocido";

/// Country segment → country name.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("13", "Paraguay"),
    ("45", "Argentina"),
    ("50", "Brasil"),
    ("78", "México"),
    ("84", "España"),
];

/// Supplier segment → supplier name.
pub const SUPPLIERS: &[(&str, &str)] = &[
    ("64", "Proveedor Guaraní S.A."),
    ("12", "Distribuidora Mercosur"),
    ("45", "TechPlus Importaciones"),
    ("33", "Importadora del Este"),
    ("77", "Comercial Paraguay"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(k, name)| if *k == code { Some(*name) } else { None })
}

/// Resolve a country segment, `None` if it is not in the table.
pub fn country_name(code: &str) -> Option<&'static str> {
    lookup(COUNTRIES, code)
}

/// Resolve a supplier segment, `None` if it is not in the table.
pub fn supplier_name(code: &str) -> Option<&'static str> {
    lookup(SUPPLIERS, code)
}
