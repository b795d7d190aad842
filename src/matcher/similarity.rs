//! Similarity strategies for approximate product name matching

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::error::{CheapcartError, Result};

/// A textual similarity measure.
///
/// Scores must lie in `[0, 1]`, with `1.0` for identical strings. Any
/// `Fn(&str, &str) -> f64` closure is a strategy, which keeps matcher tests
/// independent of a real algorithm.
pub trait Similarity: Send + Sync {
    /// Similarity of `a` and `b`
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// An upper bound on [`Similarity::similarity`] that is cheaper to compute
    fn upper_bound(&self, _a: &str, _b: &str) -> f64 {
        1.0
    }

    /// Name used in logs
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Ratcliff/Obershelp "gestalt" ratio.
///
/// Finds the longest common block, recurses into the unmatched text on both
/// sides of it, and scores `2 * matched / (len(a) + len(b))` over Unicode
/// scalar values. Arguments are put in a canonical order first so the score
/// is symmetric.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl SequenceRatio {
    /// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then in
    /// `b`, wins.
    fn longest_match(
        a: &[char],
        b: &[char],
        (alo, ahi): (usize, usize),
        (blo, bhi): (usize, usize),
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut prev = vec![0usize; b.len() + 1];
        let mut cur = vec![0usize; b.len() + 1];

        for i in alo..ahi {
            for j in blo..bhi {
                if a[i] == b[j] {
                    let k = prev[j] + 1;
                    cur[j + 1] = k;
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                } else {
                    cur[j + 1] = 0;
                }
            }
            std::mem::swap(&mut prev, &mut cur);
        }

        (best_i, best_j, best_size)
    }

    /// Total size of all matching blocks
    fn matched_chars(a: &[char], b: &[char]) -> usize {
        let mut matched = 0;
        let mut pending = vec![((0, a.len()), (0, b.len()))];

        while let Some(((alo, ahi), (blo, bhi))) = pending.pop() {
            let (i, j, size) = Self::longest_match(a, b, (alo, ahi), (blo, bhi));
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                pending.push(((alo, i), (blo, j)));
            }
            if i + size < ahi && j + size < bhi {
                pending.push(((i + size, ahi), (j + size, bhi)));
            }
        }

        matched
    }

    fn canonical<'s>(a: &'s str, b: &'s str) -> (&'s str, &'s str) {
        let (la, lb) = (a.chars().count(), b.chars().count());
        if (la, a) <= (lb, b) {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl Similarity for SequenceRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let (a, b) = Self::canonical(a, b);
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * Self::matched_chars(&a, &b) as f64 / total as f64
    }

    fn upper_bound(&self, a: &str, b: &str) -> f64 {
        let (la, lb) = (a.chars().count(), b.chars().count());
        if la + lb == 0 {
            return 1.0;
        }
        2.0 * la.min(lb) as f64 / (la + lb) as f64
    }

    fn name(&self) -> &str {
        "sequence-ratio"
    }
}

/// Normalized Levenshtein similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Similarity for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_levenshtein(a, b)
    }

    fn name(&self) -> &str {
        "levenshtein"
    }
}

/// Jaro-Winkler similarity, favouring shared prefixes
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Similarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        jaro_winkler(a, b)
    }

    fn name(&self) -> &str {
        "jaro-winkler"
    }
}

/// Built-in strategies selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityKind {
    /// [`SequenceRatio`]
    #[default]
    SequenceRatio,
    /// [`Levenshtein`]
    Levenshtein,
    /// [`JaroWinkler`]
    JaroWinkler,
}

impl SimilarityKind {
    /// Configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SequenceRatio => "sequence-ratio",
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro-winkler",
        }
    }

    /// Instantiate the strategy
    pub fn strategy(&self) -> Box<dyn Similarity> {
        match self {
            Self::SequenceRatio => Box::new(SequenceRatio),
            Self::Levenshtein => Box::new(Levenshtein),
            Self::JaroWinkler => Box::new(JaroWinkler),
        }
    }
}

impl FromStr for SimilarityKind {
    type Err = CheapcartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "sequence-ratio" | "ratio" | "gestalt" => Ok(Self::SequenceRatio),
            "levenshtein" => Ok(Self::Levenshtein),
            "jaro-winkler" => Ok(Self::JaroWinkler),
            _ => Err(CheapcartError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
