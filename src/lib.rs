//! Cheapcart - find the cheapest store for a shopping basket
//!
//! Given several store price catalogs and a basket of requested items,
//! cheapcart prices the basket at every store and ranks the stores.
//!
//! # How it works
//!
//! - **Normalize**: product names from catalogs and baskets are lower-cased
//!   and whitespace-collapsed so both sides compare alike
//! - **Match**: each basket item resolves to an exact catalog key, or to
//!   the most similar key if it scores at least the threshold (0.6)
//! - **Price**: resolved items add `unit price × quantity`; unresolved
//!   items are reported as missing
//! - **Rank**: stores that have everything come first, then the lowest
//!   total; ties go to the store discovered first
//!
//! # Quick Start
//!
//! ```bash
//! # Compare stores for two items
//! cheapcart compare piim=2 leib
//!
//! # Use a basket file and show every store
//! cheapcart compare --basket basket.json --all
//!
//! # Autocomplete a product name
//! cheapcart suggest piim
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod normalizer;
pub mod parsers;
pub mod pricer;
pub mod ranker;
pub mod suggest;

// Re-export commonly used types
pub use error::{CheapcartError, Result};
pub use matcher::{Matcher, Similarity, SimilarityKind};
pub use models::{Basket, Catalog, Price, PricingResult};
pub use normalizer::{normalize, parse_price};
pub use pricer::{price, price_all};
pub use ranker::{rank, Recommendation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Price a basket at every store and rank the results, best first
///
/// # Example
///
/// ```
/// use cheapcart::{compare, Basket, Catalog, Matcher, Price};
///
/// let milk = Price::from_f64(1.10).unwrap();
/// let stores = vec![Catalog::from_items("Selver", [("Piim", milk)])];
/// let basket: Basket = [("piim", 2)].into_iter().collect();
///
/// let ranked = compare(&stores, &basket, &Matcher::new());
/// assert_eq!(ranked[0].store_name, "Selver");
/// assert_eq!(ranked[0].total, milk.times(2));
/// ```
pub fn compare(catalogs: &[Catalog], basket: &Basket, matcher: &Matcher) -> Vec<PricingResult> {
    rank(price_all(catalogs, basket, matcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price_of(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).unwrap()
    }

    fn selver_and_rimi() -> Vec<Catalog> {
        vec![
            Catalog::from_items("Selver", [("piim", price_of(110)), ("leib", price_of(150))]),
            Catalog::from_items("Rimi", [("piim 1l", price_of(105)), ("leib", price_of(160))]),
        ]
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "cheapcart");
    }

    #[test]
    fn test_tied_stores_first_discovered_wins() {
        let basket: Basket = [("piim", 2), ("leib", 1)].into_iter().collect();
        let ranked = compare(&selver_and_rimi(), &basket, &Matcher::new());

        assert_eq!(ranked[0].store_name, "Selver");
        assert_eq!(ranked[0].total, price_of(370));
        assert!(ranked[0].missing.is_empty());
        assert_eq!(ranked[1].store_name, "Rimi");
        assert_eq!(ranked[1].total, price_of(370));
        assert!(ranked[1].missing.is_empty());
    }

    #[test]
    fn test_item_missing_everywhere() {
        let basket: Basket = [("piim", 1), ("kohuke", 3)].into_iter().collect();
        let ranked = compare(&selver_and_rimi(), &basket, &Matcher::new());

        assert!(ranked.iter().all(|r| r.missing.contains(&"kohuke".to_string())));
        assert_eq!(ranked[0].store_name, "Rimi");
        assert_eq!(ranked[0].total, price_of(105));
        assert_eq!(ranked[1].total, price_of(110));
    }

    #[test]
    fn test_empty_basket_all_zero_in_input_order() {
        let ranked = compare(&selver_and_rimi(), &Basket::new(), &Matcher::new());
        let names: Vec<_> = ranked.iter().map(|r| r.store_name.as_str()).collect();
        assert_eq!(names, vec!["Selver", "Rimi"]);
        assert!(ranked.iter().all(|r| r.total == Price::ZERO && r.missing.is_empty()));
    }

    #[test]
    fn test_complete_store_beats_cheaper_partial_store() {
        let catalogs = vec![
            Catalog::from_items("Odav", [("leib", price_of(99))]),
            Catalog::from_items("Kallis", [("leib", price_of(250)), ("kohuke", price_of(60))]),
        ];
        let basket: Basket = [("leib", 1), ("kohuke", 1)].into_iter().collect();
        let ranked = compare(&catalogs, &basket, &Matcher::new());
        assert_eq!(ranked[0].store_name, "Kallis");
        assert_eq!(ranked[1].missing, vec!["kohuke"]);
    }

    #[test]
    fn test_injected_strategy_changes_matching() {
        let never = Matcher::with_strategy(|_: &str, _: &str| 0.0);
        let basket: Basket = [("piim", 1)].into_iter().collect();
        let ranked = compare(&selver_and_rimi(), &basket, &never);
        assert_eq!(ranked[0].store_name, "Selver");
        assert_eq!(ranked[1].missing, vec!["piim"]);
    }
}
