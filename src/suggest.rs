//! Product name suggestions for partially typed input

use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::models::Catalog;
use crate::normalizer::normalize;

/// Autocomplete over the product names of several catalogs
pub struct Suggester {
    /// Distinct product keys, sorted
    names: Vec<String>,
    /// Skim fuzzy matcher for non-prefix hits
    skim: SkimMatcherV2,
}

impl Suggester {
    /// Default number of suggestions
    pub const DEFAULT_LIMIT: usize = 12;

    /// Collect the product names of all catalogs
    pub fn new(catalogs: &[Catalog]) -> Self {
        let names: HashSet<&str> = catalogs.iter().flat_map(Catalog::keys).collect();
        let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
        names.sort();

        Self {
            names,
            skim: SkimMatcherV2::default(),
        }
    }

    /// Number of distinct product names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no product names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Suggest up to `limit` names for the typed text.
    ///
    /// Names starting with the normalized input come first, alphabetically;
    /// remaining slots are filled with fuzzy hits by descending score.
    pub fn suggest(&self, typed: &str, limit: usize) -> Vec<&str> {
        let typed = normalize(typed);
        if typed.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut suggestions: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| name.starts_with(&typed))
            .take(limit)
            .collect();

        if suggestions.len() < limit {
            let mut fuzzy: Vec<(i64, &str)> = self
                .names
                .iter()
                .map(String::as_str)
                .filter(|name| !name.starts_with(&typed))
                .filter_map(|name| self.skim.fuzzy_match(name, &typed).map(|score| (score, name)))
                .collect();
            // stable: equal scores stay alphabetical
            fuzzy.sort_by(|a, b| b.0.cmp(&a.0));
            suggestions.extend(
                fuzzy
                    .into_iter()
                    .map(|(_, name)| name)
                    .take(limit - suggestions.len()),
            );
        }

        suggestions
    }
}
