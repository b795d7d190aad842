//! Store catalog files
//!
//! Every `*.json` file directly inside the data directory is one store.
//! Two layouts are understood:
//!
//! - an object `{ "store": "Rimi", "items": { "<name>": <price>, ... } }`
//! - an array of rows `[ { "nimi": "...", "hind": "1,89 €" }, ... ]`,
//!   where `name` and `price` work as well
//!
//! Rows without a usable name or price are skipped. Files are read in file
//! name order, which becomes the store discovery order used for ranking
//! ties.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{CheapcartError, Result};
use crate::models::{Catalog, CatalogBuilder, Price};
use crate::normalizer::parse_price;

/// Loader for a directory of store catalog files
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    /// Directory holding the `*.json` files
    data_dir: PathBuf,
}

impl CatalogLoader {
    /// Create a loader for the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// The data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Catalog files in discovery order
    pub fn catalog_files(&self) -> Result<Vec<PathBuf>> {
        if !self.data_dir.is_dir() {
            return Err(CheapcartError::data_dir_not_found(&self.data_dir));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.data_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let is_json = entry
                .path()
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Load every non-empty catalog in the data directory
    pub fn load_all(&self) -> Result<Vec<Catalog>> {
        let mut catalogs = Vec::new();

        for path in self.catalog_files()? {
            match Self::load_file(&path)? {
                Some(catalog) => {
                    debug!("Loaded {} products for {}", catalog.len(), catalog.name());
                    catalogs.push(catalog);
                }
                None => warn!("No usable products in {}, skipping", path.display()),
            }
        }

        if catalogs.is_empty() {
            return Err(CheapcartError::NoCatalogs(self.data_dir.clone()));
        }

        info!("Loaded {} store catalogs from {}", catalogs.len(), self.data_dir.display());
        Ok(catalogs)
    }

    /// Load one catalog file; `None` when it yields no products
    pub fn load_file(path: &Path) -> Result<Option<Catalog>> {
        let content = std::fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        parse_catalog(&stem, &content)
            .map_err(|e| CheapcartError::catalog_file(path, e.to_string()))
    }
}

/// Parse catalog JSON; `default_name` is used when the file names no store
pub fn parse_catalog(default_name: &str, content: &str) -> Result<Option<Catalog>> {
    let value: Value = serde_json::from_str(content)?;

    let builder = match value {
        Value::Object(object) => from_object(default_name, &object)?,
        Value::Array(rows) => from_rows(default_name, &rows),
        _ => {
            return Err(CheapcartError::Other(
                "expected a JSON object or array of rows".into(),
            ))
        }
    };

    if builder.is_empty() {
        Ok(None)
    } else {
        Ok(Some(builder.build()))
    }
}

fn from_object(default_name: &str, object: &Map<String, Value>) -> Result<CatalogBuilder> {
    let name = object
        .get("store")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_name);

    let mut builder = CatalogBuilder::new(name);
    match object.get("items") {
        Some(Value::Object(items)) => {
            for (item, raw_price) in items {
                insert_row(&mut builder, Some(item.as_str()), Some(raw_price));
            }
        }
        Some(Value::Array(rows)) => {
            for row in rows {
                insert_value_row(&mut builder, row);
            }
        }
        Some(_) => {
            return Err(CheapcartError::Other("\"items\" must be an object or array".into()))
        }
        None => {}
    }

    Ok(builder)
}

fn from_rows(default_name: &str, rows: &[Value]) -> CatalogBuilder {
    let mut builder = CatalogBuilder::new(default_name);
    for row in rows {
        insert_value_row(&mut builder, row);
    }
    builder
}

fn insert_value_row(builder: &mut CatalogBuilder, row: &Value) {
    let field = |names: [&str; 2]| names.iter().find_map(|n| row.get(*n));
    let name = field(["name", "nimi"]).and_then(Value::as_str);
    let raw_price = field(["price", "hind"]);
    insert_row(builder, name, raw_price);
}

fn insert_row(builder: &mut CatalogBuilder, name: Option<&str>, raw_price: Option<&Value>) {
    let (Some(name), Some(raw_price)) = (name, raw_price) else {
        debug!("Skipping row without name or price");
        return;
    };

    let Some(price) = price_from_value(raw_price) else {
        debug!("Skipping '{}': unusable price {}", name, raw_price);
        return;
    };

    if !builder.insert(name, price) {
        debug!("Skipping row with empty name");
    }
}

fn price_from_value(value: &Value) -> Option<Price> {
    match value {
        Value::Number(n) => parse_price(n.as_f64()?),
        Value::String(s) => parse_price(s.as_str()),
        _ => None,
    }
}
