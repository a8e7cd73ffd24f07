//! Intake evaluator
//!
//! Compares accumulated nutrient totals against fixed recommended-intake
//! thresholds and classifies each metric into a severity band.

use serde::Serialize;

use crate::models::{Gender, NutrientField, Nutrients};

/// Recommended daily intake for the tracked nutrients.
///
/// Fixed reference data for a typical adult, not derived from the dataset.
/// Grams except sodium (milligrams).
pub const RECOMMENDED_INTAKE: [(NutrientField, f64); 5] = [
    (NutrientField::Carbohydrate, 324.0),
    (NutrientField::Protein, 55.0),
    (NutrientField::Fat, 54.0),
    (NutrientField::Sugar, 100.0),
    (NutrientField::Sodium, 2000.0),
];

/// Total calories above which the analysis suggests light exercise
pub const HIGH_CALORIE_THRESHOLD: f64 = 2500.0;

/// Verdict on total calories against the personal recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieVerdict {
    Deficient,
    Adequate,
    Excessive,
}

impl CalorieVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieVerdict::Deficient => "deficient",
            CalorieVerdict::Adequate => "adequate",
            CalorieVerdict::Excessive => "excessive",
        }
    }
}

/// Severity band for one nutrient against its recommended intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientBand {
    SevereExcess,
    ModerateExcess,
    Adequate,
    Deficient,
}

impl NutrientBand {
    /// Indicator color for the progress rendering
    pub fn indicator_color(&self) -> &'static str {
        match self {
            NutrientBand::SevereExcess => "#ff4b4b",
            NutrientBand::ModerateExcess => "#ffc400",
            NutrientBand::Adequate => "#28a745",
            NutrientBand::Deficient => "#007bff",
        }
    }
}

/// Recommended daily calories from height and gender.
///
/// Standard weight is `(height - 100) * 0.9`; the multiplier is 30 for
/// males and 25 for females. Returns `None` when the height is absent or
/// non-positive, in which case the caller suppresses the analysis.
pub fn recommended_calories(height_cm: f64, gender: Gender) -> Option<f64> {
    if !(height_cm > 0.0) {
        return None;
    }
    let standard_weight = (height_cm - 100.0) * 0.9;
    let multiplier = match gender {
        Gender::Male => 30.0,
        Gender::Female => 25.0,
    };
    Some(standard_weight * multiplier)
}

/// Classify total calories against the recommendation.
///
/// The comparisons are strict, so both 0.8x and 1.2x land on Adequate.
pub fn classify_calories(total: f64, recommended: f64) -> CalorieVerdict {
    if total < recommended * 0.8 {
        CalorieVerdict::Deficient
    } else if total > recommended * 1.2 {
        CalorieVerdict::Excessive
    } else {
        CalorieVerdict::Adequate
    }
}

/// Classify one nutrient by its raw percentage of the recommendation
pub fn classify_nutrient(current: f64, recommended: f64) -> NutrientBand {
    let percentage = raw_percentage(current, recommended);
    if percentage >= 200.0 {
        NutrientBand::SevereExcess
    } else if percentage >= 150.0 {
        NutrientBand::ModerateExcess
    } else if percentage >= 80.0 {
        NutrientBand::Adequate
    } else {
        NutrientBand::Deficient
    }
}

/// Percentage of the recommendation, guarding a zero recommendation
fn raw_percentage(current: f64, recommended: f64) -> f64 {
    if recommended > 0.0 {
        current / recommended * 100.0
    } else {
        0.0
    }
}

/// Full evaluation of one tracked nutrient
#[derive(Debug, Clone, Serialize)]
pub struct NutrientStatus {
    pub nutrient: NutrientField,
    pub label: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub recommended: f64,
    /// Unclamped percentage driving the classification
    pub percent_raw: f64,
    /// Clamped to 100 for proportional rendering
    pub percent_display: f64,
    pub band: NutrientBand,
    pub indicator_color: &'static str,
}

/// Evaluate every tracked nutrient of a total against the reference intake
pub fn evaluate_intake(total: &Nutrients) -> Vec<NutrientStatus> {
    RECOMMENDED_INTAKE
        .iter()
        .map(|&(field, recommended)| {
            let current = total.get(field);
            let percent_raw = raw_percentage(current, recommended);
            let band = classify_nutrient(current, recommended);
            NutrientStatus {
                nutrient: field,
                label: field.label(),
                unit: field.unit(),
                current,
                recommended,
                percent_raw,
                percent_display: percent_raw.min(100.0),
                band,
                indicator_color: band.indicator_color(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_calories_by_gender() {
        // (170 - 100) * 0.9 = 63kg standard weight
        assert_eq!(recommended_calories(170.0, Gender::Male), Some(1890.0));
        assert_eq!(recommended_calories(170.0, Gender::Female), Some(1575.0));
    }

    #[test]
    fn test_recommended_calories_requires_height() {
        assert_eq!(recommended_calories(0.0, Gender::Male), None);
        assert_eq!(recommended_calories(-10.0, Gender::Female), None);
        assert_eq!(recommended_calories(f64::NAN, Gender::Male), None);
    }

    #[test]
    fn test_classify_calories_boundaries() {
        // Exactly 0.8x is Adequate, just below is Deficient
        assert_eq!(classify_calories(800.0, 1000.0), CalorieVerdict::Adequate);
        assert_eq!(classify_calories(799.99, 1000.0), CalorieVerdict::Deficient);
        // Exactly 1.2x is Adequate, just above is Excessive
        assert_eq!(classify_calories(1200.0, 1000.0), CalorieVerdict::Adequate);
        assert_eq!(classify_calories(1200.01, 1000.0), CalorieVerdict::Excessive);
    }

    #[test]
    fn test_nutrient_bands() {
        assert_eq!(classify_nutrient(200.0, 100.0), NutrientBand::SevereExcess);
        assert_eq!(classify_nutrient(150.0, 100.0), NutrientBand::ModerateExcess);
        assert_eq!(classify_nutrient(80.0, 100.0), NutrientBand::Adequate);
        assert_eq!(classify_nutrient(79.9, 100.0), NutrientBand::Deficient);
        // Zero recommendation guards the division
        assert_eq!(classify_nutrient(50.0, 0.0), NutrientBand::Deficient);
    }

    #[test]
    fn test_display_percentage_clamped_classification_raw() {
        let mut total = Nutrients::zero();
        total.sugar = 250.0; // 250% of the 100g recommendation
        let statuses = evaluate_intake(&total);
        let sugar = statuses
            .iter()
            .find(|s| s.nutrient == NutrientField::Sugar)
            .unwrap();
        assert_eq!(sugar.percent_raw, 250.0);
        assert_eq!(sugar.percent_display, 100.0);
        assert_eq!(sugar.band, NutrientBand::SevereExcess);
        assert_eq!(sugar.indicator_color, "#ff4b4b");
    }

    #[test]
    fn test_evaluate_intake_covers_all_tracked_nutrients() {
        let statuses = evaluate_intake(&Nutrients::zero());
        assert_eq!(statuses.len(), RECOMMENDED_INTAKE.len());
        assert!(statuses.iter().all(|s| s.band == NutrientBand::Deficient));
        assert!(statuses.iter().all(|s| s.percent_raw == 0.0));
    }
}
