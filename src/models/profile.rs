//! User profile
//!
//! Per-session body measurements used by the intake analysis.

use serde::{Deserialize, Serialize};

/// Gender, as used by the recommended-calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남성" => Some(Gender::Male),
            "female" | "f" | "여성" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Session-scoped user measurements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::from_str("male"), Some(Gender::Male));
        assert_eq!(Gender::from_str("남성"), Some(Gender::Male));
        assert_eq!(Gender::from_str(" Female "), Some(Gender::Female));
        assert_eq!(Gender::from_str("여성"), Some(Gender::Female));
        assert_eq!(Gender::from_str("other"), None);
    }
}
