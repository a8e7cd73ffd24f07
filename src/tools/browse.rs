//! Category browse tools
//!
//! Explore the dataset by the three-level category hierarchy and list the
//! matching foods with their per-100g calories.

use serde::Serialize;

use crate::dataset::FoodTable;
use crate::filter::{self, FilterSelections, Selection};

/// Dataset placeholder for category levels that do not apply to a food
const NOT_APPLICABLE: &str = "해당없음";

/// One food row of a browse listing
#[derive(Debug, Serialize)]
pub struct FoodRow {
    pub name: String,
    pub origin: String,
    /// Per-100g calories, zero-filled when the source cell was unparsable
    pub calories: f64,
}

/// Response for browse_foods
#[derive(Debug, Serialize)]
pub struct BrowseFoodsResponse {
    /// "major > mid > minor" path of the current selection
    pub title: String,
    pub rows: Vec<FoodRow>,
    pub total: usize,
    pub notice: Option<String>,
}

impl BrowseFoodsResponse {
    /// Empty-state response when the dataset cannot be loaded
    pub fn unavailable(notice: String) -> Self {
        Self {
            title: String::new(),
            rows: Vec::new(),
            total: 0,
            notice: Some(notice),
        }
    }
}

/// List foods under the session's browse filter chain
pub fn browse_foods(table: &FoodTable, selections: &FilterSelections) -> BrowseFoodsResponse {
    let rows: Vec<FoodRow> = filter::apply(table, &selections.constraints())
        .into_iter()
        .map(|r| FoodRow {
            name: r.name.clone(),
            origin: r.origin.clone(),
            calories: r.nutrients.calories,
        })
        .collect();

    let total = rows.len();
    let notice = if total == 0 {
        Some("No foods match the current selection".to_string())
    } else {
        None
    };

    BrowseFoodsResponse {
        title: title_path(selections),
        rows,
        total,
        notice,
    }
}

/// Join the selected category levels into a display path, skipping sentinel
/// and not-applicable levels
fn title_path(selections: &FilterSelections) -> String {
    let parts: Vec<&str> = [&selections.major, &selections.mid, &selections.minor]
        .into_iter()
        .filter_map(|s| match s {
            Selection::Value(v) if v != NOT_APPLICABLE => Some(v.as_str()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        filter::ALL_SENTINEL.to_string()
    } else {
        parts.join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FoodRecord;
    use crate::filter::FilterColumn;

    fn record(major: &str, mid: &str, minor: &str, name: &str, calories: f64) -> FoodRecord {
        let mut r = FoodRecord::default();
        r.category_major = major.to_string();
        r.category_mid = mid.to_string();
        r.category_minor = minor.to_string();
        r.name = name.to_string();
        r.origin = "Domestic".to_string();
        r.nutrients.calories = calories;
        r
    }

    fn table() -> FoodTable {
        FoodTable::new(vec![
            record("Fruit", "Fresh", "Apple", "Apple", 52.0),
            record("Fruit", "Fresh", "Banana", "Banana", 89.0),
            record("Grain", "해당없음", "해당없음", "Mixed Grain", 340.0),
        ])
    }

    #[test]
    fn test_browse_filters_and_titles() {
        let table = table();
        let mut selections = FilterSelections::new();
        selections.select(
            FilterColumn::CategoryMajor,
            Selection::Value("Fruit".to_string()),
        );
        selections.select(
            FilterColumn::CategoryMid,
            Selection::Value("Fresh".to_string()),
        );

        let resp = browse_foods(&table, &selections);
        assert_eq!(resp.total, 2);
        assert_eq!(resp.title, "Fruit > Fresh");
        assert_eq!(resp.rows[0].name, "Apple");
        assert_eq!(resp.rows[0].calories, 52.0);
    }

    #[test]
    fn test_title_skips_not_applicable_levels() {
        let table = table();
        let mut selections = FilterSelections::new();
        selections.select(
            FilterColumn::CategoryMajor,
            Selection::Value("Grain".to_string()),
        );
        selections.select(
            FilterColumn::CategoryMid,
            Selection::Value(NOT_APPLICABLE.to_string()),
        );

        let resp = browse_foods(&table, &selections);
        assert_eq!(resp.title, "Grain");
    }

    #[test]
    fn test_empty_selection_has_notice() {
        let table = table();
        let mut selections = FilterSelections::new();
        selections.select(
            FilterColumn::CategoryMajor,
            Selection::Value("Seafood".to_string()),
        );
        let resp = browse_foods(&table, &selections);
        assert_eq!(resp.total, 0);
        assert!(resp.notice.is_some());
        assert!(resp.rows.is_empty());
    }

    #[test]
    fn test_unfiltered_title_is_sentinel() {
        let table = table();
        let resp = browse_foods(&table, &FilterSelections::new());
        assert_eq!(resp.title, filter::ALL_SENTINEL);
        assert_eq!(resp.total, 3);
    }
}
