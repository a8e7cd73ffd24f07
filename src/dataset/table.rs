//! In-memory dataset table
//!
//! Holds the loaded food records in source row order.

use serde::{Deserialize, Serialize};

use crate::models::{NutrientField, Nutrients};

/// Column headers for the non-numeric structural columns of the source CSV
pub mod headers {
    pub const CATEGORY_MAJOR: &str = "식품대분류명";
    pub const CATEGORY_MID: &str = "식품중분류명";
    pub const CATEGORY_MINOR: &str = "식품소분류명";
    pub const NAME: &str = "식품명";
    pub const ORIGIN: &str = "식품기원명";
}

/// One row of the nutrition dataset
///
/// Nutrient values are stored zero-filled: a cell that failed numeric
/// parsing contributes 0.0 to `nutrients` and its field is recorded in
/// `unparsed`. Display and cart math read the zero-filled values; ranking
/// and averaging exclude unparsed cells via [`FoodRecord::numeric`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodRecord {
    pub category_major: String,
    pub category_mid: String,
    pub category_minor: String,
    pub name: String,
    pub origin: String,
    pub nutrients: Nutrients,
    /// Fields whose source cell could not be parsed as a number
    #[serde(default)]
    pub unparsed: Vec<NutrientField>,
}

impl FoodRecord {
    /// Value of a nutrient field for aggregation purposes.
    ///
    /// Returns `None` when the source cell failed numeric parsing, so
    /// rankings and averages exclude the row instead of counting a zero.
    pub fn numeric(&self, field: NutrientField) -> Option<f64> {
        if self.unparsed.contains(&field) {
            None
        } else {
            Some(self.nutrients.get(field))
        }
    }
}

/// The full dataset, rows in source order
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    records: Vec<FoodRecord>,
}

impl FoodTable {
    pub fn new(records: Vec<FoodRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FoodRecord> {
        self.records.iter()
    }

    /// First record with the given food name, if any
    pub fn find_by_name(&self, name: &str) -> Option<&FoodRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}
