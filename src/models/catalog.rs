//! Store catalogs

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::Price;
use crate::normalizer::normalize;

/// One store's normalized product name to price mapping.
///
/// Keys keep the order in which they were first inserted; the matcher
/// breaks score ties by that order. A catalog has no mutating API once
/// built.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    name: String,
    entries: Vec<(String, Price)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Start building a catalog for the named store
    pub fn builder(name: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder::new(name)
    }

    /// Build a catalog from raw `(name, price)` pairs
    pub fn from_items<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = (S, Price)>,
        S: AsRef<str>,
    {
        let mut builder = CatalogBuilder::new(name);
        for (item, price) in items {
            builder.insert(item.as_ref(), price);
        }
        builder.build()
    }

    /// Store name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price for an exact normalized key
    pub fn get(&self, key: &str) -> Option<Price> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    /// Stored key and price for an exact normalized key
    pub fn entry(&self, key: &str) -> Option<(&str, Price)> {
        self.index
            .get(key)
            .map(|&i| (self.entries[i].0.as_str(), self.entries[i].1))
    }

    /// Whether the catalog holds this exact normalized key
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in catalog iteration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, price)` pairs in catalog iteration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Price)> {
        self.entries.iter().map(|(key, price)| (key.as_str(), *price))
    }

    /// Number of distinct products
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder that normalizes names and applies the duplicate policy.
///
/// When two raw names normalize to the same key, the later price wins and
/// the key keeps its first position.
#[derive(Debug)]
pub struct CatalogBuilder {
    name: String,
    entries: Vec<(String, Price)>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    /// Create a builder for the named store
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a product by raw name.
    ///
    /// Returns `false` (and stores nothing) when the name is empty after
    /// normalization.
    pub fn insert(&mut self, raw_name: &str, price: Price) -> bool {
        let key = normalize(raw_name);
        if key.is_empty() {
            return false;
        }

        match self.index.get(&key) {
            Some(&i) => {
                debug!("{}: duplicate product '{}', keeping later price {}", self.name, key, price);
                self.entries[i].1 = price;
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, price));
            }
        }
        true
    }

    /// Number of distinct products so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish the catalog
    pub fn build(self) -> Catalog {
        Catalog {
            name: self.name,
            entries: self.entries,
            index: self.index,
        }
    }
}
