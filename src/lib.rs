//! Nutridex Library
//!
//! Core functionality for browsing, ranking, and comparing foods from a
//! per-100g nutrition dataset.

pub mod aggregate;
pub mod build_info;
pub mod dataset;
pub mod filter;
pub mod intake;
pub mod mcp;
pub mod models;
pub mod session;
pub mod tools;
