//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Interface listing configuration
    #[serde(default)]
    pub listing: ListingSection,

    /// Public address lookup configuration
    #[serde(default)]
    pub lookup: LookupSection,

    /// Automatic refresh configuration
    #[serde(default)]
    pub refresh: RefreshSection,
}

/// Interface listing section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingSection {
    /// Program printing the interface listing
    pub command: Option<String>,
}

/// Public address lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSection {
    /// Echo service URL
    pub url: Option<String>,

    /// Backend: "curl" or "http"
    pub backend: Option<String>,

    /// Path to curl
    pub curl: Option<String>,

    /// Per-lookup time limit in seconds
    pub timeout: Option<u64>,
}

/// Automatic refresh section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshSection {
    /// Interval in seconds (0 = manual only)
    pub interval: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ShowNet Configuration File

[listing]
# Program that prints the interface listing (default: /sbin/ifconfig)
# command = "/sbin/ifconfig"

[lookup]
# Service that echoes the caller's address as plain text
# url = "https://ifconfig.me"

# How lookups are performed: "curl" runs curl once per address family,
# "http" uses the built-in client
# backend = "curl"

# Path to curl for the curl backend
# curl = "/usr/bin/curl"

# Time limit for each lookup in seconds (default: 5)
timeout = 5

[refresh]
# Refresh automatically every N seconds (0 = only on request, max 86400)
interval = 0
"#
    .to_string()
}
