//! Resolve requested items against a catalog's keys

pub mod similarity;

pub use similarity::{JaroWinkler, Levenshtein, SequenceRatio, Similarity, SimilarityKind};

use std::fmt;

use crate::error::{CheapcartError, Result};
use crate::models::{Catalog, MatchKind, Price};

/// A catalog key that a requested item resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'c> {
    /// The catalog key
    pub key: &'c str,
    /// Unit price stored under the key
    pub price: Price,
    /// Exact or approximate, with score
    pub kind: MatchKind,
}

/// Exact-first, approximate-fallback name matcher.
///
/// The approximate pass scores every key with the configured
/// [`Similarity`] and accepts the best one only if it reaches the
/// threshold. Equal top scores go to the key that comes first in catalog
/// order.
pub struct Matcher {
    strategy: Box<dyn Similarity>,
    threshold: f64,
}

impl Matcher {
    /// Default minimum similarity for an approximate match
    pub const DEFAULT_THRESHOLD: f64 = 0.6;

    /// Matcher with the sequence ratio strategy and the default threshold
    pub fn new() -> Self {
        Self::with_strategy(SequenceRatio)
    }

    /// Matcher with a custom strategy and the default threshold
    pub fn with_strategy(strategy: impl Similarity + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Matcher for a built-in strategy and threshold
    pub fn from_kind(kind: SimilarityKind, threshold: f64) -> Result<Self> {
        Self {
            strategy: kind.strategy(),
            threshold: Self::DEFAULT_THRESHOLD,
        }
        .try_with_threshold(threshold)
    }

    /// Set the threshold, clamped into `[0, 1]`
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_nan() {
            Self::DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the threshold, rejecting values outside `[0, 1]`
    pub fn try_with_threshold(mut self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CheapcartError::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Minimum similarity for an approximate match
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Name of the similarity strategy
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Resolve a normalized name against a catalog
    pub fn resolve<'c>(&self, requested: &str, catalog: &'c Catalog) -> Option<Resolution<'c>> {
        if let Some((key, price)) = catalog.entry(requested) {
            return Some(Resolution {
                key,
                price,
                kind: MatchKind::Exact,
            });
        }

        let (key, score) = self.best_match(requested, catalog.keys())?;
        Some(Resolution {
            key,
            price: catalog.get(key)?,
            kind: MatchKind::Approximate { score },
        })
    }

    /// Highest-scoring candidate at or above the threshold.
    ///
    /// Candidates are scored in iteration order and only a strictly higher
    /// score replaces the current best.
    pub fn best_match<'k>(
        &self,
        requested: &str,
        candidates: impl IntoIterator<Item = &'k str>,
    ) -> Option<(&'k str, f64)> {
        let mut best: Option<(&'k str, f64)> = None;

        for candidate in candidates {
            let bound = self.strategy.upper_bound(requested, candidate);
            if bound < self.threshold || best.is_some_and(|(_, score)| bound <= score) {
                continue;
            }

            let score = self.strategy.similarity(requested, candidate);
            if score >= self.threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }

        best
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("strategy", &self.strategy.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn catalog(name: &str, keys: &[&str]) -> Catalog {
        Catalog::from_items(
            name,
            keys.iter().map(|k| (*k, Price::new(Decimal::new(100, 2)).unwrap())),
        )
    }

    #[test]
    fn test_exact_match_wins() {
        // every candidate scores 1.0, but an exact key must still be chosen
        let matcher = Matcher::with_strategy(|_: &str, _: &str| 1.0);
        let store = catalog("Selver", &["piim 1l", "piim"]);
        let resolution = matcher.resolve("piim", &store).unwrap();
        assert_eq!(resolution.key, "piim");
        assert_eq!(resolution.kind, MatchKind::Exact);
    }

    #[test]
    fn test_approximate_match_above_threshold() {
        let matcher = Matcher::new();
        let store = catalog("Rimi", &["piim 1l", "leib"]);
        let resolution = matcher.resolve("piim", &store).unwrap();
        assert_eq!(resolution.key, "piim 1l");
        assert!(resolution.kind.is_approximate());
    }

    #[test]
    fn test_no_match_below_threshold() {
        let matcher = Matcher::new();
        let store = catalog("Coop", &["piim", "leib", "sai"]);
        assert!(matcher.resolve("kohuke", &store).is_none());
    }

    #[test]
    fn test_score_equal_to_threshold_matches() {
        let matcher = Matcher::with_strategy(|_: &str, _: &str| 0.6);
        let store = catalog("Prisma", &["juust"]);
        let resolution = matcher.resolve("gouda", &store).unwrap();
        assert_eq!(resolution.kind, MatchKind::Approximate { score: 0.6 });

        let strict = Matcher::with_strategy(|_: &str, _: &str| 0.6).with_threshold(0.61);
        assert!(strict.resolve("gouda", &store).is_none());
    }

    #[test]
    fn test_tie_goes_to_first_in_catalog_order() {
        let matcher = Matcher::with_strategy(|_: &str, _: &str| 0.8);
        let store = catalog("Selver", &["zebra piim", "alpha piim"]);
        let resolution = matcher.resolve("piim", &store).unwrap();
        assert_eq!(resolution.key, "zebra piim");
    }

    #[test]
    fn test_highest_score_wins() {
        let matcher = Matcher::with_strategy(|_: &str, candidate: &str| match candidate {
            "a" => 0.7,
            "b" => 0.9,
            _ => 0.8,
        });
        let store = catalog("Rimi", &["a", "b", "c"]);
        assert_eq!(matcher.resolve("x", &store).unwrap().key, "b");
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Matcher::from_kind(SimilarityKind::Levenshtein, 1.5).is_err());
        assert!(Matcher::from_kind(SimilarityKind::Levenshtein, 0.8).is_ok());
        assert_eq!(Matcher::new().with_threshold(-2.0).threshold(), 0.0);
        assert_eq!(Matcher::new().with_threshold(f64::NAN).threshold(), Matcher::DEFAULT_THRESHOLD);
    }
}
