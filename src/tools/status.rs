//! Service status tool
//!
//! Runtime status information about the nutridex service.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::dataset::DatasetCache;

/// Usage instructions for AI assistants
pub const EXPLORER_INSTRUCTIONS: &str = r#"
# Nutridex Usage Instructions

Nutridex exposes a Korean food-composition dataset through browsing,
ranking, cart, and comparison tools. All nutrient values are per 100 grams.

## Browsing by category

Foods are classified major > mid > minor, plus an origin column.
1. `browse_options` with level "major" lists the top-level categories.
2. `set_browse_filter` picks a value for one level. Picking a level resets
   every level beneath it; use the sentinel value "전체" (or "all") to
   disable a level.
3. `browse_foods` lists the foods under the current selection with their
   per-100g calories.

## Rankings

- `top_calories`: highest-calorie foods in one major category (default 10).
- `category_averages`: mean calories per major category, descending.

## Calorie calculator

1. Narrow the picker with `set_cart_filter`, list candidates with
   `cart_food_options`.
2. `add_to_cart` with food names (100g default each). Re-adding a name is
   a no-op. Adjust with `set_cart_grams`, drop with `remove_from_cart`.
3. `view_cart` shows per-entry calories and the full nutrient totals.
4. `set_profile` (gender, height, weight), then `analyze_intake` for the
   calorie verdict and per-nutrient severity bands.
5. `reset_session` clears cart, filters, and profile.

## Comparing two foods

The comparison picker has two independent filter slots (1 and 2):
`set_compare_filter` / `compare_food_options` per slot, then
`compare_foods` with both food names.

## Sessions

Every tool accepts an optional `session` id; omit it to use the shared
default session. State never survives a server restart.
"#;

/// Dataset portion of the status report
#[derive(Debug, Serialize)]
pub struct DatasetStatus {
    pub path: String,
    pub file_exists: bool,
    /// Whether the table has been loaded into the cache
    pub cached: bool,
    pub rows: Option<usize>,
}

/// Full status report
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub dataset: DatasetStatus,
}

/// Tracks service start time and produces status reports
pub struct StatusTracker {
    start_time: Instant,
    dataset_path: PathBuf,
}

impl StatusTracker {
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            dataset_path,
        }
    }

    pub fn get_status(&self, cache: &DatasetCache) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let cached_table = cache.peek(&self.dataset_path);

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            name: build_info.name,
            version: build_info.version,
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            dataset: DatasetStatus {
                path: self.dataset_path.display().to_string(),
                file_exists: self.dataset_path.exists(),
                cached: cached_table.is_some(),
                rows: cached_table.map(|t| t.len()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_missing_dataset() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/food.csv"));
        let cache = DatasetCache::new();
        let status = tracker.get_status(&cache);
        assert!(!status.dataset.file_exists);
        assert!(!status.dataset.cached);
        assert_eq!(status.dataset.rows, None);
        assert_eq!(status.name, "nutridex");
    }
}
