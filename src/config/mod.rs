//! Configuration layer for `ShowNet`.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Every option has a default, so running without any configuration
//! reproduces the stock behavior: `/sbin/ifconfig` for the listing and
//! `curl` against `https://ifconfig.me` with a 5 second limit.
//!
//! `--once` and `--json` are CLI-only; they describe how this run
//! presents its output rather than what it inspects.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{BackendArg, Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{LookupBackend, ValidatedConfig, write_default_config};
