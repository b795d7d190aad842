//! Order per-store results and pick the recommended store

use serde::Serialize;

use crate::models::PricingResult;

/// Rank pricing results, best first.
///
/// Stores that resolve the whole basket always come before stores that
/// miss something; within each group the lower total wins. Equal results
/// keep their input order, so the store discovered first wins ties.
pub fn rank(mut results: Vec<PricingResult>) -> Vec<PricingResult> {
    results.sort_by(|a, b| {
        (!a.is_complete(), a.total).cmp(&(!b.is_complete(), b.total))
    });
    results
}

/// The winning store and everything behind it
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Head of the ranking
    pub best: PricingResult,
    /// The remaining stores, in rank order
    pub runners_up: Vec<PricingResult>,
}

impl Recommendation {
    /// Split a ranked sequence; `None` when it is empty
    pub fn from_ranked(ranked: Vec<PricingResult>) -> Option<Self> {
        let mut ranked = ranked.into_iter();
        let best = ranked.next()?;
        Some(Self {
            best,
            runners_up: ranked.collect(),
        })
    }

    /// Whether even the best store misses basket items
    pub fn is_partial(&self) -> bool {
        !self.best.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;
    use rust_decimal::Decimal;

    fn result(store: &str, cents: i64, missing: &[&str]) -> PricingResult {
        PricingResult {
            store_name: store.to_string(),
            total: Price::new(Decimal::new(cents, 2)).unwrap(),
            missing: missing.iter().map(|m| m.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    fn names(results: &[PricingResult]) -> Vec<&str> {
        results.iter().map(|r| r.store_name.as_str()).collect()
    }

    #[test]
    fn test_complete_before_partial_regardless_of_total() {
        let ranked = rank(vec![
            result("Cheap", 100, &["kohuke"]),
            result("Dear", 900, &[]),
            result("Mid", 500, &[]),
        ]);
        assert_eq!(names(&ranked), vec!["Mid", "Dear", "Cheap"]);

        for (i, a) in ranked.iter().enumerate() {
            for b in &ranked[i + 1..] {
                assert!(!(b.is_complete() && !a.is_complete()));
            }
        }
    }

    #[test]
    fn test_partial_results_ranked_by_total() {
        let ranked = rank(vec![
            result("Selver", 420, &["kohuke"]),
            result("Rimi", 390, &["kohuke"]),
            result("Coop", 410, &["kohuke", "vorst"]),
        ]);
        assert_eq!(names(&ranked), vec!["Rimi", "Coop", "Selver"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            result("Selver", 370, &[]),
            result("Rimi", 370, &[]),
            result("Coop", 0, &["x"]),
            result("Prisma", 0, &["y"]),
        ]);
        assert_eq!(names(&ranked), vec!["Selver", "Rimi", "Coop", "Prisma"]);
    }

    #[test]
    fn test_recommendation() {
        assert!(Recommendation::from_ranked(Vec::new()).is_none());

        let ranked = rank(vec![result("A", 300, &["x"]), result("B", 200, &["y"])]);
        let recommendation = Recommendation::from_ranked(ranked).unwrap();
        assert_eq!(recommendation.best.store_name, "B");
        assert_eq!(names(&recommendation.runners_up), vec!["A"]);
        assert!(recommendation.is_partial());
    }
}
