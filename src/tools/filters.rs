//! Shared filter tool plumbing
//!
//! The browse, cart, and comparison tools each hold their own cascading
//! filter chain; the selection/option logic is identical, so it lives here.

use serde::Serialize;

use crate::dataset::FoodTable;
use crate::filter::{self, FilterColumn, FilterSelections, Selection};

/// One level of a filter chain: what is selected, what can be selected
#[derive(Debug, Serialize)]
pub struct LevelOptions {
    pub level: &'static str,
    pub selected: String,
    pub options: Vec<String>,
}

/// The full chain state after a selection change
#[derive(Debug, Serialize)]
pub struct FilterStateResponse {
    pub levels: Vec<LevelOptions>,
    /// Set when the requested value was not available and fell back to the
    /// sentinel
    pub notice: Option<String>,
}

/// Parse a wire level name into a filter column
pub fn parse_level(level: &str) -> Result<FilterColumn, String> {
    FilterColumn::from_str(level)
        .ok_or_else(|| format!("Unknown filter level '{}' (expected major, mid, minor, or origin)", level))
}

/// Current chain state with the option set for every level
pub fn chain_state(table: &FoodTable, selections: &FilterSelections) -> Vec<LevelOptions> {
    FilterColumn::CASCADE
        .iter()
        .map(|&column| {
            let upstream = selections.constraints_upstream_of(column);
            let selected = match column {
                FilterColumn::CategoryMajor => selections.major.as_str(),
                FilterColumn::CategoryMid => selections.mid.as_str(),
                FilterColumn::CategoryMinor => selections.minor.as_str(),
                FilterColumn::Origin => selections.origin.as_str(),
            };
            LevelOptions {
                level: column.as_str(),
                selected: selected.to_string(),
                options: filter::available_options(table, column, &upstream),
            }
        })
        .collect()
}

/// Apply one selection to a chain, cascading resets and dropping values the
/// table no longer offers
pub fn set_filter(
    table: &FoodTable,
    selections: &mut FilterSelections,
    level: &str,
    value: &str,
) -> Result<FilterStateResponse, String> {
    let column = parse_level(level)?;
    let requested = Selection::parse(value);
    selections.select(column, requested.clone());
    selections.revalidate(table);

    let notice = match requested {
        Selection::Value(ref v) if !column_is(selections, column, v) => Some(format!(
            "'{}' is not available under the current upstream selection; level reset",
            v
        )),
        _ => None,
    };

    Ok(FilterStateResponse {
        levels: chain_state(table, selections),
        notice,
    })
}

fn column_is(selections: &FilterSelections, column: FilterColumn, value: &str) -> bool {
    let current = match column {
        FilterColumn::CategoryMajor => &selections.major,
        FilterColumn::CategoryMid => &selections.mid,
        FilterColumn::CategoryMinor => &selections.minor,
        FilterColumn::Origin => &selections.origin,
    };
    matches!(current, Selection::Value(v) if v == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FoodRecord, FoodTable};

    fn record(major: &str, mid: &str, name: &str) -> FoodRecord {
        let mut r = FoodRecord::default();
        r.category_major = major.to_string();
        r.category_mid = mid.to_string();
        r.name = name.to_string();
        r
    }

    fn table() -> FoodTable {
        FoodTable::new(vec![
            record("Fruit", "Fresh", "Apple"),
            record("Grain", "Rice", "White Rice"),
        ])
    }

    #[test]
    fn test_set_filter_updates_downstream_options() {
        let table = table();
        let mut selections = FilterSelections::new();
        let resp = set_filter(&table, &mut selections, "major", "Fruit").unwrap();
        assert!(resp.notice.is_none());

        let mids = resp.levels.iter().find(|l| l.level == "mid").unwrap();
        assert_eq!(mids.options, vec!["Fresh"]);
    }

    #[test]
    fn test_set_filter_unavailable_value_resets_with_notice() {
        let table = table();
        let mut selections = FilterSelections::new();
        set_filter(&table, &mut selections, "major", "Fruit").unwrap();
        let resp = set_filter(&table, &mut selections, "mid", "Rice").unwrap();
        assert!(resp.notice.is_some());
        assert!(selections.mid.is_all());
    }

    #[test]
    fn test_unknown_level_is_an_error() {
        let table = table();
        let mut selections = FilterSelections::new();
        assert!(set_filter(&table, &mut selections, "brand", "x").is_err());
    }
}
