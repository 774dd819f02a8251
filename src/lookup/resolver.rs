//! Lookup trait and the validating public address resolver.

use std::time::Duration;

use serde::Serialize;

use super::{LookupError, ResolveError};
use crate::config::defaults;
use crate::network::AddressFamily;

/// Trait for querying an external "what is my IP" service.
///
/// # Design
///
/// Backends only fetch raw text for one family; trimming, validation and
/// the overall time limit are applied by [`PublicIpResolver`]. This keeps
/// mock backends in tests trivial.
pub trait AddressLookup: Send + Sync {
    /// Returns the raw output of a lookup constrained to `family`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when the backend cannot produce any output.
    fn lookup(
        &self,
        family: AddressFamily,
    ) -> impl std::future::Future<Output = Result<String, LookupError>> + Send;
}

/// Outcome of resolving one family's public address.
///
/// `value` is `None` when the address is unavailable for any reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicAddressResult {
    /// The family that was looked up.
    pub family: AddressFamily,
    /// The validated address, if any.
    pub value: Option<String>,
}

impl PublicAddressResult {
    /// Creates a successful result.
    #[must_use]
    pub fn found(family: AddressFamily, value: impl Into<String>) -> Self {
        Self {
            family,
            value: Some(value.into()),
        }
    }

    /// Creates an unavailable result.
    #[must_use]
    pub const fn unavailable(family: AddressFamily) -> Self {
        Self {
            family,
            value: None,
        }
    }

    /// Returns true if an address was found.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// Resolves public addresses through an [`AddressLookup`] backend.
///
/// Every lookup is capped at the configured timeout regardless of what
/// the backend does internally.
#[derive(Debug, Clone)]
pub struct PublicIpResolver<L> {
    lookup: L,
    timeout: Duration,
}

impl<L> PublicIpResolver<L> {
    /// Creates a resolver with the default 5 second cap.
    #[must_use]
    pub const fn new(lookup: L) -> Self {
        Self {
            lookup,
            timeout: defaults::lookup_timeout(),
        }
    }

    /// Sets the hard time limit for each lookup.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the time limit.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<L: AddressLookup> PublicIpResolver<L> {
    /// Looks up the public address for `family`.
    ///
    /// Never fails: backend errors, timeouts, empty output and output that
    /// does not validate all yield [`PublicAddressResult::unavailable`].
    /// The distinction is only visible in the logs.
    pub async fn resolve(&self, family: AddressFamily) -> PublicAddressResult {
        match self.try_resolve(family).await {
            Ok(address) => {
                tracing::debug!("Public {family} address: {address}");
                PublicAddressResult::found(family, address)
            }
            Err(ResolveError::Unavailable(e)) => {
                tracing::debug!("Public {family} address unavailable: {e}");
                PublicAddressResult::unavailable(family)
            }
            Err(e) => {
                tracing::warn!("Public {family} address rejected: {e}");
                PublicAddressResult::unavailable(family)
            }
        }
    }

    async fn try_resolve(&self, family: AddressFamily) -> Result<String, ResolveError> {
        let raw = tokio::time::timeout(self.timeout, self.lookup.lookup(family))
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))??;

        check_output(family, &raw)
    }
}

/// Longest output echoed back in a rejection message.
const REJECTED_PREVIEW_CHARS: usize = 64;

/// Trims `raw` and accepts it only if it is a valid `family` address.
///
/// # Errors
///
/// Returns [`ResolveError::Empty`] for blank output and
/// [`ResolveError::Rejected`] for output that fails validation.
pub fn check_output(family: AddressFamily, raw: &str) -> Result<String, ResolveError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ResolveError::Empty);
    }

    if !family.validate(trimmed) {
        return Err(ResolveError::Rejected {
            output: trimmed.chars().take(REJECTED_PREVIEW_CHARS).collect(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
