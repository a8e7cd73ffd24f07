//! Food comparison tools
//!
//! Side-by-side comparison of two foods' nutrient profiles, each picked
//! through its own independent filter chain.

use serde::Serialize;

use crate::dataset::FoodTable;
use crate::filter::{self, FilterSelections};
use crate::models::NutrientField;
use crate::session::SessionState;

/// Fields shown in the side-by-side comparison
pub const COMPARE_FIELDS: [NutrientField; 9] = [
    NutrientField::Calories,
    NutrientField::Carbohydrate,
    NutrientField::Protein,
    NutrientField::Fat,
    NutrientField::Sugar,
    NutrientField::Sodium,
    NutrientField::Cholesterol,
    NutrientField::SaturatedFat,
    NutrientField::Fiber,
];

/// The comparison tools address the two pickers as slots 1 and 2
pub fn slot_selections(state: &mut SessionState, slot: usize) -> Result<&mut FilterSelections, String> {
    match slot {
        1 | 2 => Ok(&mut state.compare[slot - 1]),
        _ => Err(format!("Invalid comparison slot {} (expected 1 or 2)", slot)),
    }
}

/// Response for compare_food_options
#[derive(Debug, Serialize)]
pub struct CompareOptionsResponse {
    pub slot: usize,
    pub foods: Vec<String>,
    pub total: usize,
    pub notice: Option<String>,
}

impl CompareOptionsResponse {
    pub fn unavailable(slot: usize, notice: String) -> Self {
        Self {
            slot,
            foods: Vec::new(),
            total: 0,
            notice: Some(notice),
        }
    }
}

/// Food names selectable under one slot's filter chain
pub fn compare_food_options(
    table: &FoodTable,
    state: &mut SessionState,
    slot: usize,
) -> Result<CompareOptionsResponse, String> {
    let selections = slot_selections(state, slot)?;
    let foods = filter::food_names(table, &selections.constraints());
    let total = foods.len();
    let notice = if total == 0 {
        Some("No foods match the current filter".to_string())
    } else {
        None
    };
    Ok(CompareOptionsResponse {
        slot,
        foods,
        total,
        notice,
    })
}

/// One nutrient line of the comparison table
#[derive(Debug, Serialize)]
pub struct CompareRow {
    pub nutrient: NutrientField,
    pub label: &'static str,
    pub unit: &'static str,
    pub first: f64,
    pub second: f64,
}

/// Response for compare_foods
#[derive(Debug, Serialize)]
pub struct CompareFoodsResponse {
    pub first: String,
    pub second: String,
    pub rows: Vec<CompareRow>,
    pub notice: Option<String>,
}

impl CompareFoodsResponse {
    pub fn unavailable(first: String, second: String, notice: String) -> Self {
        Self {
            first,
            second,
            rows: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// Compare two foods' per-100g profiles; both must exist in the table
pub fn compare_foods(
    table: &FoodTable,
    first: &str,
    second: &str,
) -> Result<CompareFoodsResponse, String> {
    let first_record = table
        .find_by_name(first)
        .ok_or_else(|| format!("Food not found: '{}'", first))?;
    let second_record = table
        .find_by_name(second)
        .ok_or_else(|| format!("Food not found: '{}'", second))?;

    let rows = COMPARE_FIELDS
        .iter()
        .map(|&field| CompareRow {
            nutrient: field,
            label: field.label(),
            unit: field.unit(),
            first: first_record.nutrients.get(field),
            second: second_record.nutrients.get(field),
        })
        .collect();

    Ok(CompareFoodsResponse {
        first: first_record.name.clone(),
        second: second_record.name.clone(),
        rows,
        notice: None,
    })
}
