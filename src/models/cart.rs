//! Cart accumulator
//!
//! A session-local accumulation of selected foods with user-chosen gram
//! quantities. Entries are unique by food name and keep insertion order.

use serde::{Deserialize, Serialize};

use crate::dataset::FoodTable;
use super::nutrients::Nutrients;

/// One food in the cart, with its per-100g nutrient copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    pub name: String,
    /// Quantity in grams, non-negative, defaults to 100
    pub grams: f64,
    /// Per-100g nutrient vector copied from the dataset at add time
    pub nutrients: Nutrients,
}

impl CartEntry {
    /// Nutrients contributed at the current gram quantity
    pub fn contribution(&self) -> Nutrients {
        self.nutrients.clone() * (self.grams / 100.0)
    }
}

/// Outcome of an add operation, reported back to the caller
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub already_present: Vec<String>,
    pub not_found: Vec<String>,
}

/// The cart itself: insertion-ordered, unique by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Add foods by name, copying nutrients from the first matching row.
    ///
    /// Re-adding a present name is a no-op; names without a matching row
    /// are reported in the outcome rather than treated as errors.
    pub fn add_foods(&mut self, names: &[String], table: &FoodTable) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for name in names {
            if self.contains(name) {
                outcome.already_present.push(name.clone());
                continue;
            }
            match table.find_by_name(name) {
                Some(record) => {
                    self.entries.push(CartEntry {
                        name: name.clone(),
                        grams: 100.0,
                        nutrients: record.nutrients.clone(),
                    });
                    outcome.added.push(name.clone());
                }
                None => outcome.not_found.push(name.clone()),
            }
        }
        outcome
    }

    /// Replace the gram quantity for an entry; returns false when absent.
    /// The quantity must already be validated as non-negative.
    pub fn set_grams(&mut self, name: &str, grams: f64) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.grams = grams;
                true
            }
            None => false,
        }
    }

    /// Remove an entry; returns false when absent
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Full recompute of the nutrient total across all entries
    pub fn total(&self) -> Nutrients {
        self.entries.iter().map(CartEntry::contribution).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FoodRecord, FoodTable};

    fn table_with(name: &str, calories: f64) -> FoodTable {
        let mut record = FoodRecord::default();
        record.name = name.to_string();
        record.nutrients.calories = calories;
        FoodTable::new(vec![record])
    }

    #[test]
    fn test_add_is_idempotent() {
        let table = table_with("Apple", 52.0);
        let mut cart = Cart::new();

        let first = cart.add_foods(&["Apple".to_string()], &table);
        assert_eq!(first.added, vec!["Apple"]);
        cart.set_grams("Apple", 250.0);

        let second = cart.add_foods(&["Apple".to_string()], &table);
        assert_eq!(second.already_present, vec!["Apple"]);
        assert_eq!(cart.len(), 1);
        // Grams untouched by the repeated add
        assert_eq!(cart.entries()[0].grams, 250.0);
    }

    #[test]
    fn test_add_unknown_name_is_reported() {
        let table = table_with("Apple", 52.0);
        let mut cart = Cart::new();
        let outcome = cart.add_foods(&["Durian".to_string()], &table);
        assert_eq!(outcome.not_found, vec!["Durian"]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_scaling_law() {
        let table = table_with("Snack", 50.0);
        let mut cart = Cart::new();
        cart.add_foods(&["Snack".to_string()], &table);
        assert!(cart.set_grams("Snack", 200.0));
        assert_eq!(cart.total().calories, 100.0);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        let total = cart.total();
        assert_eq!(total.calories, 0.0);
        assert_eq!(total.sodium, 0.0);
    }

    #[test]
    fn test_remove_and_missing_entry_ops() {
        let table = table_with("Apple", 52.0);
        let mut cart = Cart::new();
        cart.add_foods(&["Apple".to_string()], &table);

        assert!(!cart.set_grams("Banana", 50.0));
        assert!(!cart.remove("Banana"));
        assert!(cart.remove("Apple"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_sums_entries() {
        let mut apple = FoodRecord::default();
        apple.name = "Apple".to_string();
        apple.nutrients.calories = 52.0;
        apple.nutrients.sugar = 10.0;
        let mut rice = FoodRecord::default();
        rice.name = "Rice".to_string();
        rice.nutrients.calories = 130.0;
        let table = FoodTable::new(vec![apple, rice]);

        let mut cart = Cart::new();
        cart.add_foods(&["Apple".to_string(), "Rice".to_string()], &table);
        cart.set_grams("Rice", 50.0);

        let total = cart.total();
        assert_eq!(total.calories, 52.0 + 65.0);
        assert_eq!(total.sugar, 10.0);
    }
}
