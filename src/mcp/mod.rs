//! MCP module
//!
//! Server implementation and tool routing.

pub mod server;

pub use server::NutridexService;
