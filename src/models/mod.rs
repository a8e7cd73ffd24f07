//! Data models
//!
//! Nutrient vectors, the cart, and the user profile.

mod cart;
mod nutrients;
mod profile;

pub use cart::{AddOutcome, Cart, CartEntry};
pub use nutrients::{NutrientField, Nutrients};
pub use profile::{Gender, UserProfile};
