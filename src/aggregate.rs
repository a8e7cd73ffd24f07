//! Aggregation engine
//!
//! Rankings and group-wise averages over filtered rows. Unlike the loader's
//! zero-fill policy, aggregation excludes cells that failed numeric parsing
//! from both sums and counts; zeroing them here would silently drag every
//! ranking and mean.

use serde::Serialize;

use crate::dataset::FoodRecord;
use crate::filter::FilterColumn;
use crate::models::NutrientField;

/// Top `n` rows by a nutrient field, descending.
///
/// Rows whose field cell failed parsing are excluded. The sort is stable,
/// so ties keep their source row order, and a table shorter than `n`
/// simply yields fewer rows.
pub fn top_n<'a>(rows: &[&'a FoodRecord], field: NutrientField, n: usize) -> Vec<&'a FoodRecord> {
    let mut ranked: Vec<(&FoodRecord, f64)> = rows
        .iter()
        .filter_map(|r| r.numeric(field).map(|v| (*r, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(r, _)| r).collect()
}

/// Mean of a nutrient field for one group
#[derive(Debug, Clone, Serialize)]
pub struct GroupAverage {
    pub group: String,
    pub mean: f64,
    /// Rows that contributed to the mean (unparsable cells excluded)
    pub count: usize,
}

/// Group rows by a filter column and average a nutrient field per group.
///
/// Unparsable cells are excluded from both the sum and the count. Groups
/// come back sorted descending by mean; groups with no parseable value are
/// omitted entirely.
pub fn group_average(
    rows: &[&FoodRecord],
    group_column: FilterColumn,
    field: NutrientField,
) -> Vec<GroupAverage> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: std::collections::HashMap<String, (f64, usize)> = std::collections::HashMap::new();

    for record in rows {
        let Some(value) = record.numeric(field) else {
            continue;
        };
        let group = group_column.value_of(record).to_string();
        let entry = sums.entry(group.clone()).or_insert_with(|| {
            order.push(group.clone());
            (0.0, 0)
        });
        entry.0 += value;
        entry.1 += 1;
    }

    let mut averages: Vec<GroupAverage> = order
        .into_iter()
        .map(|group| {
            let (sum, count) = sums[&group];
            GroupAverage {
                group,
                mean: sum / count as f64,
                count,
            }
        })
        .collect();
    averages.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    averages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{FoodRecord, FoodTable};
    use crate::models::Nutrients;

    fn food(major: &str, name: &str, calories: Option<f64>) -> FoodRecord {
        let mut nutrients = Nutrients::zero();
        let mut unparsed = Vec::new();
        match calories {
            Some(v) => nutrients.calories = v,
            None => unparsed.push(NutrientField::Calories),
        }
        FoodRecord {
            category_major: major.to_string(),
            category_mid: String::new(),
            category_minor: String::new(),
            name: name.to_string(),
            origin: String::new(),
            nutrients,
            unparsed,
        }
    }

    fn refs(table: &FoodTable) -> Vec<&FoodRecord> {
        table.iter().collect()
    }

    #[test]
    fn test_top_n_descending_and_truncated() {
        let table = FoodTable::new(vec![
            food("Fruit", "Apple", Some(52.0)),
            food("Fruit", "Avocado", Some(160.0)),
            food("Fruit", "Banana", Some(89.0)),
        ]);
        let rows = refs(&table);

        let top = top_n(&rows, NutrientField::Calories, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Avocado");
        assert_eq!(top[1].name, "Banana");

        // n larger than the table returns everything, still sorted
        let all = top_n(&rows, NutrientField::Calories, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].name, "Apple");
    }

    #[test]
    fn test_top_n_excludes_unparsed_and_keeps_tie_order() {
        let table = FoodTable::new(vec![
            food("Fruit", "First", Some(89.0)),
            food("Fruit", "Broken", None),
            food("Fruit", "Second", Some(89.0)),
            food("Fruit", "Third", Some(52.0)),
        ]);
        let rows = refs(&table);

        let top = top_n(&rows, NutrientField::Calories, 10);
        assert_eq!(top.len(), 3);
        // Stable: equal values keep source order
        assert_eq!(top[0].name, "First");
        assert_eq!(top[1].name, "Second");
        assert_eq!(top[2].name, "Third");
    }

    #[test]
    fn test_group_average_mean_semantics() {
        let table = FoodTable::new(vec![
            food("G", "a", Some(10.0)),
            food("G", "b", Some(20.0)),
            food("G", "c", Some(30.0)),
        ]);
        let rows = refs(&table);

        let averages = group_average(&rows, FilterColumn::CategoryMajor, NutrientField::Calories);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].group, "G");
        assert_eq!(averages[0].mean, 20.0);
        assert_eq!(averages[0].count, 3);
    }

    #[test]
    fn test_group_average_excludes_unparsed_from_sum_and_count() {
        let table = FoodTable::new(vec![
            food("G", "a", Some(10.0)),
            food("G", "broken", None),
            food("G", "b", Some(30.0)),
            food("Empty", "all-broken", None),
        ]);
        let rows = refs(&table);

        let averages = group_average(&rows, FilterColumn::CategoryMajor, NutrientField::Calories);
        // Group with no parseable values is omitted
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].mean, 20.0);
        assert_eq!(averages[0].count, 2);
    }

    #[test]
    fn test_group_average_sorted_descending() {
        let table = FoodTable::new(vec![
            food("Low", "a", Some(10.0)),
            food("High", "b", Some(300.0)),
            food("Mid", "c", Some(100.0)),
        ]);
        let rows = refs(&table);

        let averages = group_average(&rows, FilterColumn::CategoryMajor, NutrientField::Calories);
        let groups: Vec<&str> = averages.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(groups, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_fruit_scenario_end_to_end() {
        let table = FoodTable::new(vec![
            food("Fruit", "Apple", Some(52.0)),
            food("Fruit", "Banana", Some(89.0)),
            food("Fruit", "Avocado", Some(160.0)),
            food("Grain", "Rice", Some(130.0)),
        ]);
        let fruit: Vec<&FoodRecord> = table
            .iter()
            .filter(|r| r.category_major == "Fruit")
            .collect();

        let top = top_n(&fruit, NutrientField::Calories, 10);
        let calories: Vec<f64> = top.iter().map(|r| r.nutrients.calories).collect();
        assert_eq!(calories, vec![160.0, 89.0, 52.0]);

        let rows = refs(&table);
        let averages = group_average(&rows, FilterColumn::CategoryMajor, NutrientField::Calories);
        let fruit_avg = averages.iter().find(|g| g.group == "Fruit").unwrap();
        assert!((fruit_avg.mean - 100.33).abs() < 0.005);
    }
}
