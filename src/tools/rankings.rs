//! Ranking tools
//!
//! Calorie top-N within a major category and calorie averages per major
//! category, both over per-100g values.

use serde::Serialize;

use crate::aggregate;
use crate::dataset::FoodTable;
use crate::filter::{self, Constraint, FilterColumn, Selection};
use crate::models::NutrientField;

/// One ranked food
#[derive(Debug, Serialize)]
pub struct RankedFood {
    pub rank: usize,
    pub name: String,
    pub origin: String,
    pub calories: f64,
}

/// Response for top_calories
#[derive(Debug, Serialize)]
pub struct TopCaloriesResponse {
    pub category: String,
    pub requested: usize,
    pub rows: Vec<RankedFood>,
    pub notice: Option<String>,
}

impl TopCaloriesResponse {
    pub fn unavailable(notice: String) -> Self {
        Self {
            category: String::new(),
            requested: 0,
            rows: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// Top `limit` foods by calories within a major category (or the whole
/// table for the sentinel). Rows whose calorie cell failed parsing are
/// excluded from the ranking rather than zeroed.
pub fn top_calories(table: &FoodTable, category: &str, limit: usize) -> TopCaloriesResponse {
    let selection = Selection::parse(category);
    let constraints = vec![Constraint::new(FilterColumn::CategoryMajor, selection.clone())];
    let rows = filter::apply(table, &constraints);

    let ranked: Vec<RankedFood> = aggregate::top_n(&rows, NutrientField::Calories, limit)
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedFood {
            rank: i + 1,
            name: r.name.clone(),
            origin: r.origin.clone(),
            calories: r.nutrients.calories,
        })
        .collect();

    let notice = if ranked.is_empty() {
        Some(format!("No ranked foods for category '{}'", selection.as_str()))
    } else {
        None
    };

    TopCaloriesResponse {
        category: selection.as_str().to_string(),
        requested: limit,
        rows: ranked,
        notice,
    }
}

/// Mean calories for one major category
#[derive(Debug, Serialize)]
pub struct CategoryAverage {
    pub category: String,
    /// Arithmetic mean of per-100g calories, rounded to two decimals
    pub mean_calories: f64,
    pub foods_counted: usize,
}

/// Response for category_averages
#[derive(Debug, Serialize)]
pub struct CategoryAveragesResponse {
    pub rows: Vec<CategoryAverage>,
    pub notice: Option<String>,
}

impl CategoryAveragesResponse {
    pub fn unavailable(notice: String) -> Self {
        Self {
            rows: Vec::new(),
            notice: Some(notice),
        }
    }
}

/// Calorie averages per major category, sorted descending by mean
pub fn category_averages(table: &FoodTable) -> CategoryAveragesResponse {
    let rows: Vec<&crate::dataset::FoodRecord> = table.iter().collect();
    let averages = aggregate::group_average(&rows, FilterColumn::CategoryMajor, NutrientField::Calories);

    let rows: Vec<CategoryAverage> = averages
        .into_iter()
        .map(|g| CategoryAverage {
            category: g.group,
            mean_calories: round2(g.mean),
            foods_counted: g.count,
        })
        .collect();

    let notice = if rows.is_empty() {
        Some("No calorie data available".to_string())
    } else {
        None
    };

    CategoryAveragesResponse { rows, notice }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
