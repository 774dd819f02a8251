//! In-process lookup backend using reqwest.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use super::{AddressLookup, LookupError};
use crate::config::defaults;
use crate::network::AddressFamily;

/// Fetches the echo endpoint over HTTP without spawning a process.
///
/// Each family gets its own client whose sockets are bound to the
/// unspecified address of that family, which restricts name resolution
/// and connection to that family the same way `curl -4`/`-6` does.
///
/// The body is returned whatever the status code, matching the
/// command-line backend which does not pass `--fail`.
#[derive(Debug, Clone)]
pub struct ReqwestLookup {
    v4: reqwest::Client,
    v6: reqwest::Client,
    url: url::Url,
    timeout: Duration,
}

impl ReqwestLookup {
    /// Creates a lookup against `url` using the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Setup`] if a client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(url: url::Url) -> Result<Self, LookupError> {
        Self::with_timeout(url, defaults::lookup_timeout())
    }

    /// Creates a lookup against `url` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Setup`] if a client cannot be built.
    pub fn with_timeout(url: url::Url, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            v4: build_client(IpAddr::V4(Ipv4Addr::UNSPECIFIED), timeout)?,
            v6: build_client(IpAddr::V6(Ipv6Addr::UNSPECIFIED), timeout)?,
            url,
            timeout,
        })
    }

    const fn client(&self, family: AddressFamily) -> &reqwest::Client {
        match family {
            AddressFamily::V4 => &self.v4,
            AddressFamily::V6 => &self.v6,
        }
    }
}

fn build_client(local: IpAddr, timeout: Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .local_address(local)
        .timeout(timeout)
        .build()
        .map_err(|e| LookupError::Setup(e.to_string()))
}

fn map_error(error: reqwest::Error, timeout: Duration) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout(timeout)
    } else {
        LookupError::Http(Box::new(error))
    }
}

impl AddressLookup for ReqwestLookup {
    async fn lookup(&self, family: AddressFamily) -> Result<String, LookupError> {
        let timeout = self.timeout;

        let response = self
            .client(family)
            .get(self.url.as_str())
            .send()
            .await
            .map_err(|e| map_error(e, timeout))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| map_error(e, timeout))?;

        tracing::debug!("{family} lookup via HTTP returned {status}");

        Ok(body)
    }
}
