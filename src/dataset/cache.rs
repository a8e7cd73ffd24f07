//! Dataset cache
//!
//! Memoizes loaded tables by file identity for the life of the process. The
//! source file is treated as immutable for a session, so there is no
//! invalidation path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

use super::loader::{self, DatasetResult};
use super::table::FoodTable;

/// Process-wide cache of loaded dataset tables
#[derive(Default)]
pub struct DatasetCache {
    tables: Mutex<HashMap<PathBuf, Arc<FoodTable>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the table for a path, loading and caching it on first use
    pub fn get_or_load<P: AsRef<Path>>(&self, path: P) -> DatasetResult<Arc<FoodTable>> {
        let key = cache_key(path.as_ref());

        if let Some(table) = self.tables.lock().expect("dataset cache poisoned").get(&key) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(loader::load(path.as_ref())?);
        info!(path = %key.display(), rows = table.len(), "dataset loaded");

        self.tables
            .lock()
            .expect("dataset cache poisoned")
            .insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Cached table for a path, without triggering a load
    pub fn peek<P: AsRef<Path>>(&self, path: P) -> Option<Arc<FoodTable>> {
        let key = cache_key(path.as_ref());
        self.tables
            .lock()
            .expect("dataset cache poisoned")
            .get(&key)
            .cloned()
    }
}

/// Canonicalize when possible so aliases of the same file share one entry
fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
