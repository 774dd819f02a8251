//! Process-backed interface listing source.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{DiscoveryError, InterfaceSource};

/// Runs a listing program (normally `/sbin/ifconfig`) with no arguments.
///
/// Only standard output is parsed. The exit status is ignored: a tool that
/// prints a usable listing and then complains still counts as a success.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: PathBuf,
}

impl CommandSource {
    /// Creates a source running `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for CommandSource {
    fn default() -> Self {
        Self::new(crate::config::defaults::LISTING_COMMAND)
    }
}

impl InterfaceSource for CommandSource {
    fn read_listing(&self) -> Result<String, DiscoveryError> {
        let output = Command::new(&self.program)
            .output()
            .map_err(|source| DiscoveryError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            tracing::debug!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
