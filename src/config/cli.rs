//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// `ShowNet`: network status at a glance
///
/// Lists active interface addresses and the host's public IPv4/IPv6
/// addresses, and copies any of them on request.
#[derive(Debug, Parser)]
#[command(name = "shownet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Program that prints the interface listing
    #[arg(long, value_name = "PATH")]
    pub ifconfig: Option<PathBuf>,

    /// URL of a service that echoes the caller's IP address
    #[arg(long = "lookup-url", value_name = "URL")]
    pub lookup_url: Option<String>,

    /// How public lookups are performed
    #[arg(long = "lookup-backend", value_enum)]
    pub lookup_backend: Option<BackendArg>,

    /// Path to curl for the curl backend
    #[arg(long, value_name = "PATH")]
    pub curl: Option<PathBuf>,

    /// Time limit for each public lookup in seconds
    #[arg(long = "lookup-timeout", value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// Refresh automatically every SECS seconds (0 disables)
    #[arg(long = "refresh-interval", value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Run a single refresh, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Print menus as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for shownet
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Lookup backend argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Run curl once per address family
    #[value(name = "curl")]
    Curl,
    /// Use the built-in HTTP client
    #[value(name = "http")]
    Http,
}

impl From<BackendArg> for super::LookupBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Curl => Self::Curl,
            BackendArg::Http => Self::Http,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
