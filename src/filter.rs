//! Cascading category filter pipeline
//!
//! Foods are classified by a three-level category hierarchy plus an origin
//! column. Each level's options are the distinct values among rows matching
//! the levels above it, and changing a level resets everything beneath it to
//! the "all" sentinel.

use serde::{Deserialize, Serialize};

use crate::dataset::{FoodRecord, FoodTable};

/// Wire value for the no-filtering sentinel (the dataset's UI language)
pub const ALL_SENTINEL: &str = "전체";

/// Filterable columns, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterColumn {
    CategoryMajor,
    CategoryMid,
    CategoryMinor,
    Origin,
}

impl FilterColumn {
    /// All columns, upstream to downstream
    pub const CASCADE: [FilterColumn; 4] = [
        FilterColumn::CategoryMajor,
        FilterColumn::CategoryMid,
        FilterColumn::CategoryMinor,
        FilterColumn::Origin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterColumn::CategoryMajor => "major",
            FilterColumn::CategoryMid => "mid",
            FilterColumn::CategoryMinor => "minor",
            FilterColumn::Origin => "origin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "major" => Some(FilterColumn::CategoryMajor),
            "mid" => Some(FilterColumn::CategoryMid),
            "minor" => Some(FilterColumn::CategoryMinor),
            "origin" => Some(FilterColumn::Origin),
            _ => None,
        }
    }

    /// Value of this column on a record
    pub fn value_of<'a>(&self, record: &'a FoodRecord) -> &'a str {
        match self {
            FilterColumn::CategoryMajor => &record.category_major,
            FilterColumn::CategoryMid => &record.category_mid,
            FilterColumn::CategoryMinor => &record.category_minor,
            FilterColumn::Origin => &record.origin,
        }
    }
}

/// A selected filter value, or the sentinel that disables the level
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Parse a wire value; the sentinel and "all" (any case) mean no filter
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ALL_SENTINEL || trimmed.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Value(trimmed.to_string())
        }
    }

    /// Whether a row value satisfies this selection
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => v == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL_SENTINEL,
            Selection::Value(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// One (column, selection) pair
#[derive(Debug, Clone)]
pub struct Constraint {
    pub column: FilterColumn,
    pub selection: Selection,
}

impl Constraint {
    pub fn new(column: FilterColumn, selection: Selection) -> Self {
        Self { column, selection }
    }

    fn matches(&self, record: &FoodRecord) -> bool {
        self.selection.matches(self.column.value_of(record))
    }
}

/// Rows satisfying every non-all constraint, in source order
pub fn apply<'a>(table: &'a FoodTable, constraints: &[Constraint]) -> Vec<&'a FoodRecord> {
    table
        .iter()
        .filter(|r| constraints.iter().all(|c| c.matches(r)))
        .collect()
}

/// Distinct values of a column among rows satisfying the upstream
/// constraints, in first-occurrence order from the source table
pub fn available_options(
    table: &FoodTable,
    column: FilterColumn,
    upstream: &[Constraint],
) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut options = Vec::new();
    for record in table.iter() {
        if !upstream.iter().all(|c| c.matches(record)) {
            continue;
        }
        let value = column.value_of(record);
        if seen.insert(value.to_string()) {
            options.push(value.to_string());
        }
    }
    options
}

/// Distinct food names among rows satisfying the constraints
pub fn food_names(table: &FoodTable, constraints: &[Constraint]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for record in apply(table, constraints) {
        if seen.insert(record.name.clone()) {
            names.push(record.name.clone());
        }
    }
    names
}

/// Session-held selection state for one cascading filter chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelections {
    pub major: Selection,
    pub mid: Selection,
    pub minor: Selection,
    pub origin: Selection,
}

impl FilterSelections {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, column: FilterColumn) -> &Selection {
        match column {
            FilterColumn::CategoryMajor => &self.major,
            FilterColumn::CategoryMid => &self.mid,
            FilterColumn::CategoryMinor => &self.minor,
            FilterColumn::Origin => &self.origin,
        }
    }

    fn set(&mut self, column: FilterColumn, selection: Selection) {
        match column {
            FilterColumn::CategoryMajor => self.major = selection,
            FilterColumn::CategoryMid => self.mid = selection,
            FilterColumn::CategoryMinor => self.minor = selection,
            FilterColumn::Origin => self.origin = selection,
        }
    }

    /// Set one level and reset every level beneath it to the sentinel
    pub fn select(&mut self, column: FilterColumn, selection: Selection) {
        let mut downstream = false;
        for level in FilterColumn::CASCADE {
            if downstream {
                self.set(level, Selection::All);
            } else if level == column {
                self.set(level, selection.clone());
                downstream = true;
            }
        }
    }

    /// Constraints for every level
    pub fn constraints(&self) -> Vec<Constraint> {
        FilterColumn::CASCADE
            .iter()
            .map(|&c| Constraint::new(c, self.get(c).clone()))
            .collect()
    }

    /// Constraints for the levels strictly above `column`
    pub fn constraints_upstream_of(&self, column: FilterColumn) -> Vec<Constraint> {
        FilterColumn::CASCADE
            .iter()
            .take_while(|&&c| c != column)
            .map(|&c| Constraint::new(c, self.get(c).clone()))
            .collect()
    }

    /// Drop selections that the table no longer offers.
    ///
    /// After an upstream change a previously chosen value can disappear
    /// from its level's option set; such a stale selection resets itself
    /// and everything beneath it to the sentinel instead of erroring.
    pub fn revalidate(&mut self, table: &FoodTable) {
        for level in FilterColumn::CASCADE {
            let selection = self.get(level).clone();
            if let Selection::Value(ref v) = selection {
                let upstream = self.constraints_upstream_of(level);
                if !available_options(table, level, &upstream).iter().any(|o| o == v) {
                    self.select(level, Selection::All);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FoodRecord;
    use crate::models::Nutrients;

    fn record(major: &str, mid: &str, minor: &str, name: &str, origin: &str) -> FoodRecord {
        FoodRecord {
            category_major: major.to_string(),
            category_mid: mid.to_string(),
            category_minor: minor.to_string(),
            name: name.to_string(),
            origin: origin.to_string(),
            nutrients: Nutrients::zero(),
            unparsed: Vec::new(),
        }
    }

    fn sample_table() -> FoodTable {
        FoodTable::new(vec![
            record("Fruit", "Fresh", "Apple", "Apple", "Domestic"),
            record("Fruit", "Fresh", "Banana", "Banana", "Imported"),
            record("Fruit", "Dried", "Raisin", "Raisin", "Imported"),
            record("Grain", "Rice", "White", "White Rice", "Domestic"),
        ])
    }

    #[test]
    fn test_apply_empty_constraints_returns_all_rows() {
        let table = sample_table();
        let rows = apply(&table, &[]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "Apple");
        assert_eq!(rows[3].name, "White Rice");
    }

    #[test]
    fn test_apply_matches_every_non_all_constraint() {
        let table = sample_table();
        let constraints = vec![
            Constraint::new(
                FilterColumn::CategoryMajor,
                Selection::Value("Fruit".to_string()),
            ),
            Constraint::new(FilterColumn::CategoryMid, Selection::All),
            Constraint::new(FilterColumn::Origin, Selection::Value("Imported".to_string())),
        ];
        let rows = apply(&table, &constraints);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Banana");
        assert_eq!(rows[1].name, "Raisin");
    }

    #[test]
    fn test_available_options_first_occurrence_order() {
        let table = sample_table();
        let options = available_options(&table, FilterColumn::CategoryMajor, &[]);
        assert_eq!(options, vec!["Fruit", "Grain"]);

        let upstream = vec![Constraint::new(
            FilterColumn::CategoryMajor,
            Selection::Value("Fruit".to_string()),
        )];
        let mids = available_options(&table, FilterColumn::CategoryMid, &upstream);
        assert_eq!(mids, vec!["Fresh", "Dried"]);
    }

    #[test]
    fn test_available_options_empty_subset() {
        let table = sample_table();
        let upstream = vec![Constraint::new(
            FilterColumn::CategoryMajor,
            Selection::Value("Seafood".to_string()),
        )];
        let options = available_options(&table, FilterColumn::CategoryMid, &upstream);
        assert!(options.is_empty());
    }

    #[test]
    fn test_select_resets_downstream_levels() {
        let mut selections = FilterSelections::new();
        selections.select(
            FilterColumn::CategoryMajor,
            Selection::Value("Fruit".to_string()),
        );
        selections.select(
            FilterColumn::CategoryMid,
            Selection::Value("Fresh".to_string()),
        );
        selections.select(FilterColumn::Origin, Selection::Value("Imported".to_string()));

        selections.select(
            FilterColumn::CategoryMajor,
            Selection::Value("Grain".to_string()),
        );
        assert_eq!(selections.major, Selection::Value("Grain".to_string()));
        assert!(selections.mid.is_all());
        assert!(selections.minor.is_all());
        assert!(selections.origin.is_all());
    }

    #[test]
    fn test_revalidate_resets_stale_selection() {
        let table = sample_table();
        let mut selections = FilterSelections::new();
        selections.major = Selection::Value("Grain".to_string());
        // Stale leftover from a previous major selection
        selections.mid = Selection::Value("Fresh".to_string());

        selections.revalidate(&table);
        assert_eq!(selections.major, Selection::Value("Grain".to_string()));
        assert!(selections.mid.is_all());
    }

    #[test]
    fn test_selection_parse_sentinel() {
        assert!(Selection::parse("전체").is_all());
        assert!(Selection::parse("ALL").is_all());
        assert!(Selection::parse("  ").is_all());
        assert_eq!(
            Selection::parse(" Fruit "),
            Selection::Value("Fruit".to_string())
        );
    }

    #[test]
    fn test_food_names_distinct() {
        let mut records = vec![
            record("Fruit", "Fresh", "Apple", "Apple", "Domestic"),
            record("Fruit", "Fresh", "Apple", "Apple", "Imported"),
        ];
        records.push(record("Fruit", "Fresh", "Banana", "Banana", "Domestic"));
        let table = FoodTable::new(records);
        assert_eq!(food_names(&table, &[]), vec!["Apple", "Banana"]);
    }
}
