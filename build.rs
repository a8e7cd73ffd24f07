//! Embeds a monotonically increasing build number and the compile
//! timestamp, so the status tool can report exactly which binary is running.

use std::fs;

const COUNTER_FILE: &str = "build_number.txt";

fn next_build_number() -> u64 {
    let previous = fs::read_to_string(COUNTER_FILE)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    previous + 1
}

fn main() {
    // Recompiles of unchanged sources keep their build number
    println!("cargo:rerun-if-changed=src");

    let build = next_build_number();
    fs::write(COUNTER_FILE, build.to_string()).expect("failed to update build_number.txt");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=NUTRIDEX_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=NUTRIDEX_BUILD_TIMESTAMP={}", timestamp);
}
