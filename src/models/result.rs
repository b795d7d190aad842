//! Per-store pricing results

use serde::Serialize;

use super::Price;

/// How a basket item was resolved against a catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// The normalized name is a catalog key
    Exact,
    /// The closest catalog key by similarity score
    Approximate {
        /// Similarity score in `[0, 1]`
        score: f64,
    },
}

impl MatchKind {
    /// Whether the match was a substitution rather than an exact hit
    pub fn is_approximate(&self) -> bool {
        matches!(self, Self::Approximate { .. })
    }
}

/// One resolved basket line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedLine {
    /// Normalized name from the basket
    pub requested: String,
    /// Catalog key it resolved to
    pub matched_key: String,
    /// Exact or approximate
    pub kind: MatchKind,
    /// Catalog unit price
    pub unit_price: Price,
    /// Requested quantity
    pub quantity: u32,
    /// `unit_price * quantity`
    pub line_total: Price,
}

/// Cost of a basket at one store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    /// Store name
    pub store_name: String,
    /// Sum of all resolved lines
    pub total: Price,
    /// Basket items the store could not resolve, in basket order
    pub missing: Vec<String>,
    /// Resolved lines, in basket order
    pub lines: Vec<PricedLine>,
}

impl PricingResult {
    /// Result with nothing priced and nothing missing
    pub fn empty(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            total: Price::ZERO,
            missing: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Whether the store resolves every basket item
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Number of unresolved basket items
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// Lines that were priced through an approximate match
    pub fn substitutions(&self) -> impl Iterator<Item = &PricedLine> {
        self.lines.iter().filter(|line| line.kind.is_approximate())
    }
}
