//! Nutridex
//!
//! An MCP server for browsing, ranking, and comparing foods from a
//! per-100g nutrition dataset.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod build_info;
mod dataset;
mod filter;
mod intake;
mod mcp;
mod models;
mod session;
mod tools;

use dataset::DatasetCache;
use mcp::NutridexService;

/// Get the dataset path from environment or use default
fn get_dataset_path() -> PathBuf {
    std::env::var("NUTRIDEX_DATASET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("food.csv");
            path
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutridex=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Get dataset path
    let dataset_path = get_dataset_path();
    eprintln!("Dataset path: {}", dataset_path.display());

    // Warm the dataset cache; a missing file degrades to empty-state tool
    // responses instead of refusing to start
    let cache = Arc::new(DatasetCache::new());
    match cache.get_or_load(&dataset_path) {
        Ok(table) => eprintln!("Dataset loaded: {} rows", table.len()),
        Err(e) => eprintln!("Dataset not loaded yet: {}", e),
    }

    // Create the nutridex service
    let service = NutridexService::new(dataset_path, cache);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
