//! CSV layout of the product datastore.
//!
//! Header names and column order are the compatibility contract for any
//! external tooling that reads the file directly.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use scanstock_products::{Catalog, ProductRecord};

use super::r#trait::{StoreError, StoreResult};

/// Column header, in on-disk order.
pub const HEADER: [&str; 7] = [
    "codigo",
    "nombre",
    "categoria",
    "precio",
    "pais",
    "proveedor",
    "stock",
];

/// Parse rows by header name. Columns outside [`HEADER`] (e.g. `imagen`,
/// written by other tools) are kept on each record as unmanaged extras.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ProductRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record: ProductRecord = row.deserialize(Some(&headers))?;
        let extras: BTreeMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .filter(|(name, _)| !name.is_empty() && !HEADER.contains(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(record.with_extras(extras));
    }
    Ok(records)
}

/// Write the header followed by one row per record: the [`HEADER`] columns,
/// then every unmanaged column seen on any record, sorted by name. An empty
/// slice produces a header-only document.
pub fn write_records<W: Write>(writer: W, records: &[ProductRecord]) -> Result<(), csv::Error> {
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extras().keys().map(String::as_str))
        .collect();

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER.iter().copied().chain(extra_columns.iter().copied()))?;

    for record in records {
        let price = record.price().to_string();
        let stock = record.stock().to_string();
        let fixed = [
            record.code(),
            record.name(),
            record.category(),
            price.as_str(),
            record.country(),
            record.supplier(),
            stock.as_str(),
        ];
        let extras = extra_columns
            .iter()
            .map(|column| record.extras().get(*column).map_or("", String::as_str));
        wtr.write_record(fixed.into_iter().chain(extras))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Load a catalog from `path`. A missing file is an empty catalog.
pub fn load(path: &Path) -> StoreResult<Catalog> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "datastore missing; starting empty");
            return Ok(Catalog::new());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let rows = read_records(file).map_err(|e| StoreError::csv(path, e))?;
    Catalog::from_records(rows).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Sibling staging file used for atomic replacement: `.<name>.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "products.csv".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Rewrite the whole file: stage into a temp file, fsync, then rename over
/// `path`. Either the new contents are in place or the old file is untouched.
pub fn save(path: &Path, catalog: &Catalog) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
    }

    let tmp = temp_path(path);
    let result = write_staged(&tmp, catalog)
        .and_then(|()| std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e)));

    if result.is_err() && tmp.exists() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %e, "failed to clean up staging file");
        }
    }
    result
}

fn write_staged(tmp: &Path, catalog: &Catalog) -> StoreResult<()> {
    let mut file = File::create(tmp).map_err(|e| StoreError::io(tmp, e))?;
    write_records(&mut file, catalog.list()).map_err(|e| StoreError::csv(tmp, e))?;
    file.sync_all().map_err(|e| StoreError::io(tmp, e))
}
