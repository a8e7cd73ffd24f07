//! Nutridex tools module
//!
//! MCP tool implementations for the nutrition dataset explorer.

pub mod browse;
pub mod cart;
pub mod compare;
pub mod filters;
pub mod rankings;
pub mod status;
