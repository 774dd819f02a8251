//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Program producing the interface listing.
pub const LISTING_COMMAND: &str = "/sbin/ifconfig";

/// Program used by the command-line lookup backend.
pub const CURL_COMMAND: &str = "/usr/bin/curl";

/// Endpoint that echoes the caller's address as plain text.
pub const LOOKUP_URL: &str = "https://ifconfig.me";

/// Hard cap on each public lookup, in seconds.
pub const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Default refresh interval in seconds (0 = refresh only on request).
pub const REFRESH_INTERVAL_SECS: u64 = 0;

/// Longest accepted refresh interval in seconds (one day).
pub const REFRESH_INTERVAL_MAX_SECS: u64 = 86_400;

/// Default config file name written by `init`.
pub const CONFIG_FILE: &str = "shownet.toml";

/// Default lookup cap as Duration.
#[must_use]
pub const fn lookup_timeout() -> Duration {
    Duration::from_secs(LOOKUP_TIMEOUT_SECS)
}
