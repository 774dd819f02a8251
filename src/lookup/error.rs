//! Error types for public address lookups.

use std::time::Duration;

use thiserror::Error;

/// Error type for a single lookup backend call.
///
/// None of these reach the user directly; the resolver collapses them all
/// into an "unavailable" result.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The lookup tool could not be started or waited on.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The lookup did not finish within the allowed time.
    #[error("Lookup timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    /// The HTTP request failed before a body was received.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend could not be constructed.
    #[error("Lookup backend setup failed: {0}")]
    Setup(String),
}

/// Why a lookup produced no usable address.
///
/// Only used for logging: every variant is shown to the user the same way.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The backend failed outright.
    #[error("lookup unavailable: {0}")]
    Unavailable(#[from] LookupError),

    /// The backend returned nothing but whitespace.
    #[error("lookup returned empty output")]
    Empty,

    /// The backend returned text that is not an address of the requested family.
    #[error("lookup output rejected: {output:?}")]
    Rejected {
        /// The trimmed output, truncated for logging.
        output: String,
    },
}
