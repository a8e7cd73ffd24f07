//! Compile-time build metadata
//!
//! The build script embeds a build counter and timestamp through env vars;
//! this module exposes them as constants and a serializable snapshot.

use serde::Serialize;

/// Build counter, bumped by the build script on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("NUTRIDEX_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Compile timestamp in ISO 8601, or "unknown" outside the build script
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIDEX_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Decimal parse usable in const context; rejects empty and non-digit input
const fn parse_u64(s: &str) -> Option<u64> {
    let mut bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut value: u64 = 0;
    while let [digit, rest @ ..] = bytes {
        if !digit.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (*digit - b'0') as u64;
        bytes = rest;
    }
    Some(value)
}

/// Snapshot of the build metadata, embedded in status responses
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// One-line startup banner, on stderr so the stdio transport stays clean
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!(
        "{} v{} (build {}, compiled {})",
        info.name, info.version, info.build_number, info.build_timestamp
    );
    eprintln!("{}", info.description);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64("417"), Some(417));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("12a"), None);
    }
}
