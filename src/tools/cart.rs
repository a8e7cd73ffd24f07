//! Calorie calculator tools
//!
//! Cart management, nutrient totals, and the personalized intake analysis.

use serde::Serialize;

use crate::dataset::FoodTable;
use crate::filter;
use crate::intake::{self, CalorieVerdict, NutrientStatus, HIGH_CALORIE_THRESHOLD};
use crate::models::{AddOutcome, Gender, NutrientField, UserProfile};
use crate::session::SessionState;

/// Response for cart_food_options
#[derive(Debug, Serialize)]
pub struct FoodOptionsResponse {
    pub foods: Vec<String>,
    pub total: usize,
    pub notice: Option<String>,
}

impl FoodOptionsResponse {
    pub fn unavailable(notice: String) -> Self {
        Self {
            foods: Vec::new(),
            total: 0,
            notice: Some(notice),
        }
    }
}

/// Distinct food names under the session's cart filter chain
pub fn cart_food_options(table: &FoodTable, state: &SessionState) -> FoodOptionsResponse {
    let foods = filter::food_names(table, &state.cart_filter.constraints());
    let total = foods.len();
    let notice = if total == 0 {
        Some("No foods match the current filter".to_string())
    } else {
        None
    };
    FoodOptionsResponse {
        foods,
        total,
        notice,
    }
}

/// Response for add_to_cart
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub added: Vec<String>,
    pub already_present: Vec<String>,
    pub not_found: Vec<String>,
    pub cart_size: usize,
    pub notice: Option<String>,
}

impl AddToCartResponse {
    /// No-op response when the dataset cannot be loaded
    pub fn unavailable(names: &[String], notice: String) -> Self {
        Self {
            added: Vec::new(),
            already_present: Vec::new(),
            not_found: names.to_vec(),
            cart_size: 0,
            notice: Some(notice),
        }
    }
}

/// Add foods to the session cart by name.
///
/// The lookup runs over the full table, not the filtered view, so a filter
/// change after adding does not invalidate cart contents.
pub fn add_to_cart(table: &FoodTable, state: &mut SessionState, names: &[String]) -> AddToCartResponse {
    let AddOutcome {
        added,
        already_present,
        not_found,
    } = state.cart.add_foods(names, table);
    AddToCartResponse {
        added,
        already_present,
        not_found,
        cart_size: state.cart.len(),
        notice: None,
    }
}

/// Response for set_cart_grams and remove_from_cart
#[derive(Debug, Serialize)]
pub struct CartUpdateResponse {
    pub name: String,
    pub found: bool,
    pub cart_size: usize,
    pub total_calories: f64,
}

/// Replace the gram quantity for a cart entry
pub fn set_cart_grams(state: &mut SessionState, name: &str, grams: f64) -> Result<CartUpdateResponse, String> {
    if !grams.is_finite() || grams < 0.0 {
        return Err("grams must be a non-negative number".to_string());
    }
    let found = state.cart.set_grams(name, grams);
    Ok(CartUpdateResponse {
        name: name.to_string(),
        found,
        cart_size: state.cart.len(),
        total_calories: state.cart.total().calories,
    })
}

/// Remove an entry from the cart; absent names are a no-op
pub fn remove_from_cart(state: &mut SessionState, name: &str) -> CartUpdateResponse {
    let found = state.cart.remove(name);
    CartUpdateResponse {
        name: name.to_string(),
        found,
        cart_size: state.cart.len(),
        total_calories: state.cart.total().calories,
    }
}

/// One cart entry as displayed
#[derive(Debug, Serialize)]
pub struct CartEntryView {
    pub name: String,
    pub grams: f64,
    /// Calories contributed at the current gram quantity
    pub calories: f64,
}

/// One line of the full nutrient total
#[derive(Debug, Serialize)]
pub struct NutrientAmount {
    pub nutrient: NutrientField,
    pub label: &'static str,
    pub unit: &'static str,
    pub amount: f64,
}

/// Response for view_cart
#[derive(Debug, Serialize)]
pub struct ViewCartResponse {
    pub entries: Vec<CartEntryView>,
    pub total_calories: f64,
    /// Complete nutrient totals across all entries
    pub totals: Vec<NutrientAmount>,
    pub notice: Option<String>,
}

/// Cart contents with per-entry contributions and the full nutrient total,
/// recomputed from scratch on every call
pub fn view_cart(state: &SessionState) -> ViewCartResponse {
    let entries: Vec<CartEntryView> = state
        .cart
        .entries()
        .iter()
        .map(|e| CartEntryView {
            name: e.name.clone(),
            grams: e.grams,
            calories: e.contribution().calories,
        })
        .collect();

    let total = state.cart.total();
    let totals: Vec<NutrientAmount> = NutrientField::ALL
        .iter()
        .map(|&field| NutrientAmount {
            nutrient: field,
            label: field.label(),
            unit: field.unit(),
            amount: total.get(field),
        })
        .collect();

    let notice = if entries.is_empty() {
        Some("Cart is empty; add foods first".to_string())
    } else {
        None
    };

    ViewCartResponse {
        entries,
        total_calories: total.calories,
        totals,
        notice,
    }
}

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub gender: &'static str,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub recommended_calories: Option<f64>,
}

/// Store the session's body measurements
pub fn set_profile(
    state: &mut SessionState,
    gender: &str,
    height_cm: f64,
    weight_kg: f64,
) -> Result<ProfileResponse, String> {
    let gender = Gender::from_str(gender)
        .ok_or_else(|| format!("Unknown gender '{}' (expected male or female)", gender))?;
    if !height_cm.is_finite() || height_cm < 0.0 {
        return Err("height_cm must be a non-negative number".to_string());
    }
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err("weight_kg must be a non-negative number".to_string());
    }

    state.profile = Some(UserProfile {
        gender,
        height_cm,
        weight_kg,
    });

    Ok(ProfileResponse {
        gender: gender.as_str(),
        height_cm,
        weight_kg,
        recommended_calories: intake::recommended_calories(height_cm, gender),
    })
}

/// Response for analyze_intake
#[derive(Debug, Serialize)]
pub struct AnalyzeIntakeResponse {
    pub total_calories: f64,
    pub recommended_calories: Option<f64>,
    pub verdict: Option<CalorieVerdict>,
    pub message: Option<String>,
    pub nutrients: Vec<NutrientStatus>,
    pub high_calorie_alert: bool,
    pub notice: Option<String>,
}

/// Personalized intake analysis over the cart total.
///
/// Without a profile (or with a non-positive height) the calorie verdict is
/// suppressed entirely rather than computed from nonsense inputs; the
/// nutrient bands still apply since their reference values are fixed.
pub fn analyze_intake(state: &SessionState) -> AnalyzeIntakeResponse {
    let total = state.cart.total();
    let nutrients = intake::evaluate_intake(&total);
    let high_calorie_alert = total.calories > HIGH_CALORIE_THRESHOLD;

    let recommended = state
        .profile
        .as_ref()
        .and_then(|p| intake::recommended_calories(p.height_cm, p.gender));

    let (verdict, message, notice) = match recommended {
        Some(rec) => {
            let verdict = intake::classify_calories(total.calories, rec);
            let message = match verdict {
                CalorieVerdict::Deficient => format!(
                    "Current intake is below the recommended {:.0} kcal",
                    rec
                ),
                CalorieVerdict::Excessive => format!(
                    "Current intake exceeds the recommended {:.0} kcal",
                    rec
                ),
                CalorieVerdict::Adequate => format!(
                    "Current intake is close to the recommended {:.0} kcal",
                    rec
                ),
            };
            (Some(verdict), Some(message), None)
        }
        None => (
            None,
            None,
            Some("Set a profile with a positive height to enable the calorie analysis".to_string()),
        ),
    };

    AnalyzeIntakeResponse {
        total_calories: total.calories,
        recommended_calories: recommended,
        verdict,
        message,
        nutrients,
        high_calorie_alert,
        notice,
    }
}
