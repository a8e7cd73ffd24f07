//! Shared nutrient vector
//!
//! The fixed set of per-100g nutrient measurements attached to every food
//! record, plus the field enum used to address individual measurements.

use serde::{Deserialize, Serialize};

/// One numeric nutrient column of the source dataset.
///
/// Each field knows its source column header (the dataset uses Korean
/// headers), an English display label, and its measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientField {
    Calories,
    Water,
    Protein,
    Fat,
    Ash,
    Carbohydrate,
    Sugar,
    Fiber,
    Calcium,
    Iron,
    Phosphorus,
    Potassium,
    Sodium,
    VitaminA,
    Retinol,
    BetaCarotene,
    Thiamine,
    Riboflavin,
    Niacin,
    VitaminC,
    VitaminD,
    Cholesterol,
    SaturatedFat,
    TransFat,
}

impl NutrientField {
    /// All nutrient fields, in source column order
    pub const ALL: [NutrientField; 24] = [
        NutrientField::Calories,
        NutrientField::Water,
        NutrientField::Protein,
        NutrientField::Fat,
        NutrientField::Ash,
        NutrientField::Carbohydrate,
        NutrientField::Sugar,
        NutrientField::Fiber,
        NutrientField::Calcium,
        NutrientField::Iron,
        NutrientField::Phosphorus,
        NutrientField::Potassium,
        NutrientField::Sodium,
        NutrientField::VitaminA,
        NutrientField::Retinol,
        NutrientField::BetaCarotene,
        NutrientField::Thiamine,
        NutrientField::Riboflavin,
        NutrientField::Niacin,
        NutrientField::VitaminC,
        NutrientField::VitaminD,
        NutrientField::Cholesterol,
        NutrientField::SaturatedFat,
        NutrientField::TransFat,
    ];

    /// Column header as it appears in the source CSV (after trimming)
    pub fn header(&self) -> &'static str {
        match self {
            NutrientField::Calories => "에너지(kcal)",
            NutrientField::Water => "수분(g)",
            NutrientField::Protein => "단백질(g)",
            NutrientField::Fat => "지방(g)",
            NutrientField::Ash => "회분(g)",
            NutrientField::Carbohydrate => "탄수화물(g)",
            NutrientField::Sugar => "당류(g)",
            NutrientField::Fiber => "식이섬유(g)",
            NutrientField::Calcium => "칼슘(mg)",
            NutrientField::Iron => "철(mg)",
            NutrientField::Phosphorus => "인(mg)",
            NutrientField::Potassium => "칼륨(mg)",
            NutrientField::Sodium => "나트륨(mg)",
            NutrientField::VitaminA => "비타민 A(μg RAE)",
            NutrientField::Retinol => "레티놀(μg)",
            NutrientField::BetaCarotene => "베타카로틴(μg)",
            NutrientField::Thiamine => "티아민(mg)",
            NutrientField::Riboflavin => "리보플라빈(mg)",
            NutrientField::Niacin => "니아신(mg)",
            NutrientField::VitaminC => "비타민 C(mg)",
            NutrientField::VitaminD => "비타민 D(μg)",
            NutrientField::Cholesterol => "콜레스테롤(mg)",
            NutrientField::SaturatedFat => "포화지방산(g)",
            NutrientField::TransFat => "트랜스지방산(g)",
        }
    }

    /// English display label
    pub fn label(&self) -> &'static str {
        match self {
            NutrientField::Calories => "calories",
            NutrientField::Water => "water",
            NutrientField::Protein => "protein",
            NutrientField::Fat => "fat",
            NutrientField::Ash => "ash",
            NutrientField::Carbohydrate => "carbohydrate",
            NutrientField::Sugar => "sugar",
            NutrientField::Fiber => "fiber",
            NutrientField::Calcium => "calcium",
            NutrientField::Iron => "iron",
            NutrientField::Phosphorus => "phosphorus",
            NutrientField::Potassium => "potassium",
            NutrientField::Sodium => "sodium",
            NutrientField::VitaminA => "vitamin_a",
            NutrientField::Retinol => "retinol",
            NutrientField::BetaCarotene => "beta_carotene",
            NutrientField::Thiamine => "thiamine",
            NutrientField::Riboflavin => "riboflavin",
            NutrientField::Niacin => "niacin",
            NutrientField::VitaminC => "vitamin_c",
            NutrientField::VitaminD => "vitamin_d",
            NutrientField::Cholesterol => "cholesterol",
            NutrientField::SaturatedFat => "saturated_fat",
            NutrientField::TransFat => "trans_fat",
        }
    }

    /// Measurement unit for display
    pub fn unit(&self) -> &'static str {
        match self {
            NutrientField::Calories => "kcal",
            NutrientField::Water
            | NutrientField::Protein
            | NutrientField::Fat
            | NutrientField::Ash
            | NutrientField::Carbohydrate
            | NutrientField::Sugar
            | NutrientField::Fiber
            | NutrientField::SaturatedFat
            | NutrientField::TransFat => "g",
            NutrientField::Calcium
            | NutrientField::Iron
            | NutrientField::Phosphorus
            | NutrientField::Potassium
            | NutrientField::Sodium
            | NutrientField::Thiamine
            | NutrientField::Riboflavin
            | NutrientField::Niacin
            | NutrientField::VitaminC
            | NutrientField::Cholesterol => "mg",
            NutrientField::VitaminA => "μg RAE",
            NutrientField::Retinol | NutrientField::BetaCarotene | NutrientField::VitaminD => "μg",
        }
    }

    /// Parse from a snake_case label
    pub fn from_label(s: &str) -> Option<Self> {
        NutrientField::ALL
            .iter()
            .copied()
            .find(|f| f.label() == s.to_lowercase())
    }
}

/// Per-100g nutrient measurements for one food
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,      // kcal
    pub water: f64,         // grams
    pub protein: f64,       // grams
    pub fat: f64,           // grams
    pub ash: f64,           // grams
    pub carbohydrate: f64,  // grams
    pub sugar: f64,         // grams
    pub fiber: f64,         // grams
    pub calcium: f64,       // milligrams
    pub iron: f64,          // milligrams
    pub phosphorus: f64,    // milligrams
    pub potassium: f64,     // milligrams
    pub sodium: f64,        // milligrams
    pub vitamin_a: f64,     // micrograms RAE
    pub retinol: f64,       // micrograms
    pub beta_carotene: f64, // micrograms
    pub thiamine: f64,      // milligrams
    pub riboflavin: f64,    // milligrams
    pub niacin: f64,        // milligrams
    pub vitamin_c: f64,     // milligrams
    pub vitamin_d: f64,     // micrograms
    pub cholesterol: f64,   // milligrams
    pub saturated_fat: f64, // grams
    pub trans_fat: f64,     // grams
}

impl Nutrients {
    /// Create a new Nutrients with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Read one field
    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Water => self.water,
            NutrientField::Protein => self.protein,
            NutrientField::Fat => self.fat,
            NutrientField::Ash => self.ash,
            NutrientField::Carbohydrate => self.carbohydrate,
            NutrientField::Sugar => self.sugar,
            NutrientField::Fiber => self.fiber,
            NutrientField::Calcium => self.calcium,
            NutrientField::Iron => self.iron,
            NutrientField::Phosphorus => self.phosphorus,
            NutrientField::Potassium => self.potassium,
            NutrientField::Sodium => self.sodium,
            NutrientField::VitaminA => self.vitamin_a,
            NutrientField::Retinol => self.retinol,
            NutrientField::BetaCarotene => self.beta_carotene,
            NutrientField::Thiamine => self.thiamine,
            NutrientField::Riboflavin => self.riboflavin,
            NutrientField::Niacin => self.niacin,
            NutrientField::VitaminC => self.vitamin_c,
            NutrientField::VitaminD => self.vitamin_d,
            NutrientField::Cholesterol => self.cholesterol,
            NutrientField::SaturatedFat => self.saturated_fat,
            NutrientField::TransFat => self.trans_fat,
        }
    }

    /// Write one field
    pub fn set(&mut self, field: NutrientField, value: f64) {
        match field {
            NutrientField::Calories => self.calories = value,
            NutrientField::Water => self.water = value,
            NutrientField::Protein => self.protein = value,
            NutrientField::Fat => self.fat = value,
            NutrientField::Ash => self.ash = value,
            NutrientField::Carbohydrate => self.carbohydrate = value,
            NutrientField::Sugar => self.sugar = value,
            NutrientField::Fiber => self.fiber = value,
            NutrientField::Calcium => self.calcium = value,
            NutrientField::Iron => self.iron = value,
            NutrientField::Phosphorus => self.phosphorus = value,
            NutrientField::Potassium => self.potassium = value,
            NutrientField::Sodium => self.sodium = value,
            NutrientField::VitaminA => self.vitamin_a = value,
            NutrientField::Retinol => self.retinol = value,
            NutrientField::BetaCarotene => self.beta_carotene = value,
            NutrientField::Thiamine => self.thiamine = value,
            NutrientField::Riboflavin => self.riboflavin = value,
            NutrientField::Niacin => self.niacin = value,
            NutrientField::VitaminC => self.vitamin_c = value,
            NutrientField::VitaminD => self.vitamin_d = value,
            NutrientField::Cholesterol => self.cholesterol = value,
            NutrientField::SaturatedFat => self.saturated_fat = value,
            NutrientField::TransFat => self.trans_fat = value,
        }
    }

    /// Scale all values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut out = Nutrients::zero();
        for field in NutrientField::ALL {
            out.set(field, self.get(field) * multiplier);
        }
        out
    }

    /// Add another nutrient vector to this one
    pub fn add(&self, other: &Nutrients) -> Self {
        let mut out = Nutrients::zero();
        for field in NutrientField::ALL {
            out.set(field, self.get(field) + other.get(field));
        }
        out
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}
