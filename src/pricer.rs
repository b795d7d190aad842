//! Cost a basket against store catalogs

use rayon::prelude::*;
use tracing::debug;

use crate::matcher::Matcher;
use crate::models::{Basket, Catalog, MatchKind, PricedLine, PricingResult};

/// Price a basket at one store.
///
/// Every basket item is resolved once through `matcher`. A resolved item
/// adds its full quantity at the catalog unit price; an unresolved one is
/// reported in `missing` and adds nothing. An empty basket costs zero.
pub fn price(catalog: &Catalog, basket: &Basket, matcher: &Matcher) -> PricingResult {
    let mut result = PricingResult::empty(catalog.name());

    for (item, quantity) in basket.iter() {
        let Some(resolution) = matcher.resolve(item, catalog) else {
            debug!("{}: no match for '{}'", catalog.name(), item);
            result.missing.push(item.to_string());
            continue;
        };

        if let MatchKind::Approximate { score } = resolution.kind {
            debug!(
                "{}: '{}' priced as '{}' (score {:.3})",
                catalog.name(),
                item,
                resolution.key,
                score
            );
        }

        let unit_price = resolution.price;
        let line_total = unit_price.times(quantity);
        result.total += line_total;
        result.lines.push(PricedLine {
            requested: item.to_string(),
            matched_key: resolution.key.to_string(),
            kind: resolution.kind,
            unit_price,
            quantity,
            line_total,
        });
    }

    result
}

/// Price a basket at every store, in parallel.
///
/// Results come back in catalog order.
pub fn price_all(catalogs: &[Catalog], basket: &Basket, matcher: &Matcher) -> Vec<PricingResult> {
    catalogs
        .par_iter()
        .map(|catalog| price(catalog, basket, matcher))
        .collect()
}
