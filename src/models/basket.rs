//! Shopping basket

use std::collections::HashMap;

use serde::Serialize;

use crate::normalizer::normalize;

/// Requested items and quantities, keyed by normalized name.
///
/// Adding an item that is already present raises its quantity. Iteration
/// follows first insertion order, which is the order `missing` items are
/// reported in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Basket {
    items: Vec<(String, u32)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Basket {
    /// Create an empty basket
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product given by raw name.
    ///
    /// Returns `false` when nothing was added: the name is empty after
    /// normalization or the quantity is zero.
    pub fn add(&mut self, raw_name: &str, quantity: u32) -> bool {
        let key = normalize(raw_name);
        if key.is_empty() || quantity == 0 {
            return false;
        }

        match self.index.get(&key) {
            Some(&i) => {
                let entry = &mut self.items[i].1;
                *entry = entry.saturating_add(quantity);
            }
            None => {
                self.index.insert(key.clone(), self.items.len());
                self.items.push((key, quantity));
            }
        }
        true
    }

    /// Replace the quantity of an item; a zero quantity removes it
    pub fn set_quantity(&mut self, raw_name: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(raw_name).is_some();
        }
        let key = normalize(raw_name);
        match self.index.get(&key) {
            Some(&i) => {
                self.items[i].1 = quantity;
                true
            }
            None => self.add(&key, quantity),
        }
    }

    /// Remove an item, returning its quantity
    pub fn remove(&mut self, raw_name: &str) -> Option<u32> {
        let key = normalize(raw_name);
        let position = self.index.remove(&key)?;
        let (_, quantity) = self.items.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(quantity)
    }

    /// Quantity requested for an item
    pub fn quantity(&self, raw_name: &str) -> Option<u32> {
        let key = normalize(raw_name);
        self.index.get(&key).map(|&i| self.items[i].1)
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// `(normalized name, quantity)` pairs in basket order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, qty)| (name.as_str(), *qty))
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the basket holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for Basket {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut basket = Basket::new();
        for (name, quantity) in iter {
            basket.add(name.as_ref(), quantity);
        }
        basket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates_quantity() {
        let mut basket = Basket::new();
        assert!(basket.add("Piim", 1));
        assert!(basket.add("  piim ", 2));
        assert_eq!(basket.len(), 1);
        assert_eq!(basket.quantity("PIIM"), Some(3));
    }

    #[test]
    fn test_add_rejects_empty_and_zero() {
        let mut basket = Basket::new();
        assert!(!basket.add("  ", 1));
        assert!(!basket.add("leib", 0));
        assert!(basket.is_empty());
    }

    #[test]
    fn test_iteration_follows_first_insertion() {
        let basket: Basket = [("sai", 1), ("piim", 2), ("sai", 1), ("kohuke", 4)]
            .into_iter()
            .collect();
        let items: Vec<_> = basket.iter().collect();
        assert_eq!(items, vec![("sai", 2), ("piim", 2), ("kohuke", 4)]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut basket: Basket = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(basket.remove("b"), Some(2));
        assert_eq!(basket.remove("b"), None);
        assert_eq!(basket.iter().collect::<Vec<_>>(), vec![("a", 1), ("c", 3)]);
        assert_eq!(basket.quantity("c"), Some(3));
    }

    #[test]
    fn test_set_quantity() {
        let mut basket: Basket = [("leib", 1)].into_iter().collect();
        assert!(basket.set_quantity("leib", 5));
        assert_eq!(basket.quantity("leib"), Some(5));
        assert!(basket.set_quantity("leib", 0));
        assert!(basket.is_empty());
        basket.clear();
        assert!(basket.is_empty());
    }
}
