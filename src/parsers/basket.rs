//! Basket input from files and command-line arguments

use std::path::Path;

use serde_json::Value;

use crate::error::{CheapcartError, Result};
use crate::models::Basket;

/// Parse a single `name=qty` or bare `name` entry
pub fn parse_basket_entry(entry: &str) -> Result<(String, u32)> {
    let (name, quantity) = match entry.rsplit_once('=') {
        Some((name, qty)) => {
            let qty = qty.trim();
            let quantity: u32 = qty.parse().map_err(|_| {
                CheapcartError::basket_entry(format!("invalid quantity '{}' in '{}'", qty, entry))
            })?;
            (name, quantity)
        }
        None => (entry, 1),
    };

    if name.trim().is_empty() {
        return Err(CheapcartError::basket_entry(format!("missing item name in '{}'", entry)));
    }
    if quantity == 0 {
        return Err(CheapcartError::basket_entry(format!("quantity must be at least 1 in '{}'", entry)));
    }

    Ok((name.to_string(), quantity))
}

/// Build a basket from `name=qty` arguments
pub fn parse_basket_args<S: AsRef<str>>(entries: &[S]) -> Result<Basket> {
    let mut basket = Basket::new();
    for entry in entries {
        let (name, quantity) = parse_basket_entry(entry.as_ref())?;
        basket.add(&name, quantity);
    }
    Ok(basket)
}

/// Parse basket JSON: an array of `{ "item": "...", "qty": n }` objects
/// or plain item names
pub fn parse_basket_json(content: &str) -> Result<Basket> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(entries) = value else {
        return Err(CheapcartError::basket_entry("basket file must hold a JSON array"));
    };

    let mut basket = Basket::new();
    for entry in &entries {
        let (name, quantity) = match entry {
            Value::String(name) => (name.as_str(), 1),
            Value::Object(object) => {
                let name = object
                    .get("item")
                    .or_else(|| object.get("name"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| CheapcartError::basket_entry(format!("missing item in {}", entry)))?;
                let quantity = match object.get("qty").or_else(|| object.get("quantity")) {
                    None => 1,
                    Some(qty) => qty
                        .as_u64()
                        .and_then(|q| u32::try_from(q).ok())
                        .filter(|q| *q > 0)
                        .ok_or_else(|| {
                            CheapcartError::basket_entry(format!("invalid quantity in {}", entry))
                        })?,
                };
                (name, quantity)
            }
            _ => return Err(CheapcartError::basket_entry(format!("unexpected entry {}", entry))),
        };

        if !basket.add(name, quantity) {
            return Err(CheapcartError::basket_entry(format!("empty item name in {}", entry)));
        }
    }

    Ok(basket)
}

/// Load a basket JSON file
pub fn load_basket_file(path: &Path) -> Result<Basket> {
    let content = std::fs::read_to_string(path)?;
    parse_basket_json(&content)
}
