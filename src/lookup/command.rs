//! Lookup backend that shells out to `curl`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;

use super::{AddressLookup, LookupError};
use crate::config::defaults;
use crate::network::AddressFamily;

/// Runs `curl -s -4|-6 --max-time <secs> <url>` and returns its output.
///
/// Standard output and standard error are returned together, in that
/// order, and the exit status is ignored. The child is killed if the
/// returned future is dropped, so an outer timeout never leaks processes.
#[derive(Debug, Clone)]
pub struct CommandLookup {
    program: PathBuf,
    url: url::Url,
    timeout: Duration,
}

impl CommandLookup {
    /// Creates a lookup running `program` against `url`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, url: url::Url) -> Self {
        Self {
            program: program.into(),
            url,
            timeout: defaults::lookup_timeout(),
        }
    }

    /// Sets the time limit passed to the tool.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Returns the arguments passed for `family`.
    #[must_use]
    pub fn args(&self, family: AddressFamily) -> Vec<String> {
        let family_flag = match family {
            AddressFamily::V4 => "-4",
            AddressFamily::V6 => "-6",
        };

        vec![
            "-s".to_string(),
            family_flag.to_string(),
            "--max-time".to_string(),
            self.timeout.as_secs().max(1).to_string(),
            self.url.to_string(),
        ]
    }
}

impl AddressLookup for CommandLookup {
    async fn lookup(&self, family: AddressFamily) -> Result<String, LookupError> {
        let output = Command::new(&self.program)
            .args(self.args(family))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| LookupError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        tracing::debug!(
            "{} lookup via {} exited with {}",
            family,
            self.program.display(),
            output.status
        );

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        Ok(String::from_utf8_lossy(&combined).into_owned())
    }
}
