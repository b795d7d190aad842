//! Canonical forms for product names and price text
//!
//! Catalog names and basket names must both pass through [`normalize`]
//! before they are stored or compared; the matcher only ever sees
//! normalized keys.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::Price;

lazy_static! {
    /// First decimal-number-shaped substring, with an optional sign directly in front
    static ref PRICE_RE: Regex = Regex::new(r"(-?)(\d+(?:[.,]\d+)?)").unwrap();
}

/// Normalize a free-text product name into a comparison key.
///
/// Lower-cases the text and collapses every whitespace run (including
/// leading and trailing whitespace) into a single space. The empty string
/// maps to itself; rejecting it is up to the caller.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw price value as found in a catalog row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput<'a> {
    /// Price text such as `"1,89 €"` or `"0.99"`
    Text(&'a str),
    /// Already numeric price
    Number(f64),
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for PriceInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<f64> for PriceInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parse a price from text or a number.
///
/// Text may use a comma as the decimal separator and may carry a currency
/// symbol around the number (`"1,89 €"`). Numbers followed by `%` are
/// skipped, so `"Soodus -20% 1,89 €"` reads as 1.89. Returns `None` when no
/// number is present or the value is negative or not finite; a `None` means
/// the row is skipped, not that loading failed.
pub fn parse_price<'a>(raw: impl Into<PriceInput<'a>>) -> Option<Price> {
    match raw.into() {
        PriceInput::Number(value) => Price::from_f64(value),
        PriceInput::Text(text) => {
            // percentages ("-20%", "2,5%") describe the product, not its price
            let caps = PRICE_RE.captures_iter(text).find(|caps| {
                let end = caps.get(0).map_or(0, |m| m.end());
                !text[end..].trim_start().starts_with('%')
            })?;
            if !caps.get(1)?.as_str().is_empty() {
                return None;
            }
            let number = caps.get(2)?.as_str().replace(',', ".");
            Decimal::from_str(&number).ok().and_then(Price::new)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("  Piim   1L "), "piim 1l");
        assert_eq!(normalize("Tere\tHommikust\nLeib"), "tere hommikust leib");
        assert_eq!(normalize("ÕUNAMAHL"), "õunamahl");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "  Piim 2,5%  1L ",
            "KOHUKE\t\tVANILJE",
            "",
            "already normal",
            "Ärge   UNUSTAGE",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price("1,89 €"), Price::new(Decimal::new(189, 2)));
        assert_eq!(parse_price("0.99"), Price::new(Decimal::new(99, 2)));
        assert_eq!(parse_price("€ 12"), Price::new(Decimal::new(12, 0)));
        assert_eq!(parse_price("hind: 2,50 €/kg"), Price::new(Decimal::new(250, 2)));
    }

    #[test]
    fn test_parse_price_skips_percentages() {
        assert_eq!(parse_price("Soodus -20% 1,89 €"), Price::new(Decimal::new(189, 2)));
        assert_eq!(parse_price("Piim 2,5 % 1,09 €"), Price::new(Decimal::new(109, 2)));
        assert_eq!(parse_price("-15%"), None);
    }

    #[test]
    fn test_parse_price_rejects_unusable() {
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-1,50 €"), None);
        assert_eq!(parse_price(f64::NAN), None);
        assert_eq!(parse_price(-0.5), None);
    }

    #[test]
    fn test_parse_price_number() {
        assert_eq!(parse_price(1.89), Price::new(Decimal::new(189, 2)));
        assert_eq!(parse_price(0.0), Some(Price::ZERO));
    }
}
