//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// How public addresses are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupBackend {
    /// Run curl once per address family.
    #[default]
    Curl,
    /// Use the built-in HTTP client.
    Http,
}

impl fmt::Display for LookupBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curl => write!(f, "curl"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Program printing the interface listing
    pub listing_command: PathBuf,

    /// Echo service URL
    pub lookup_url: Url,

    /// Lookup backend
    pub lookup_backend: LookupBackend,

    /// Path to curl (used by [`LookupBackend::Curl`])
    pub curl_command: PathBuf,

    /// Per-lookup time limit
    pub lookup_timeout: Duration,

    /// Automatic refresh interval; `None` means refresh only on request
    pub refresh_interval: Option<Duration>,

    /// Run one refresh and exit
    pub once: bool,

    /// Print menus as JSON
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let refresh = self
            .refresh_interval
            .map_or_else(|| "manual".to_string(), |d| format!("{}s", d.as_secs()));

        write!(
            f,
            "Config {{ listing: {}, lookup: {} via {}, timeout: {}s, refresh: {}, once: {} }}",
            self.listing_command.display(),
            self.lookup_url,
            self.lookup_backend,
            self.lookup_timeout.as_secs(),
            refresh,
            self.once,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lookup URL is invalid or not http(s)
    /// - The lookup backend name is unknown
    /// - The lookup timeout is zero
    /// - The refresh interval is longer than one day
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let listing_command = cli
            .ifconfig
            .clone()
            .or_else(|| toml.and_then(|t| t.listing.command.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::LISTING_COMMAND));

        let curl_command = cli
            .curl
            .clone()
            .or_else(|| toml.and_then(|t| t.lookup.curl.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::CURL_COMMAND));

        Ok(Self {
            listing_command,
            lookup_url: Self::resolve_url(cli, toml)?,
            lookup_backend: Self::resolve_backend(cli, toml)?,
            curl_command,
            lookup_timeout: Self::resolve_timeout(cli, toml)?,
            refresh_interval: Self::resolve_refresh_interval(cli, toml)?,
            once: cli.once,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .lookup_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.lookup.url.as_deref()))
            .unwrap_or(defaults::LOOKUP_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{other}', expected http or https"),
            }),
        }
    }

    fn resolve_backend(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<LookupBackend, ConfigError> {
        if let Some(backend) = cli.lookup_backend {
            return Ok(backend.into());
        }

        toml.and_then(|t| t.lookup.backend.as_deref())
            .map_or(Ok(LookupBackend::default()), parse_backend)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .lookup_timeout
            .or_else(|| toml.and_then(|t| t.lookup.timeout))
            .unwrap_or(defaults::LOOKUP_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "lookup_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_refresh_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<Duration>, ConfigError> {
        let seconds = cli
            .refresh_interval
            .or_else(|| toml.and_then(|t| t.refresh.interval))
            .unwrap_or(defaults::REFRESH_INTERVAL_SECS);

        if seconds > defaults::REFRESH_INTERVAL_MAX_SECS {
            return Err(ConfigError::InvalidDuration {
                field: "refresh_interval",
                reason: format!(
                    "must be at most {} seconds",
                    defaults::REFRESH_INTERVAL_MAX_SECS
                ),
            });
        }

        Ok((seconds > 0).then(|| Duration::from_secs(seconds)))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_backend(s: &str) -> Result<LookupBackend, ConfigError> {
    match s.to_lowercase().as_str() {
        "curl" | "command" => Ok(LookupBackend::Curl),
        "http" | "builtin" => Ok(LookupBackend::Http),
        _ => Err(ConfigError::InvalidBackend {
            value: s.to_string(),
        }),
    }
}
