//! Dataset module
//!
//! Handles loading, validating, and caching the nutrition dataset.

pub mod cache;
pub mod loader;
pub mod table;

pub use cache::DatasetCache;
pub use loader::{load, parse_bytes, DatasetError, DatasetResult};
pub use table::{headers, FoodRecord, FoodTable};
