//! Public address lookup layer.
//!
//! This module provides types and traits for:
//! - Abstracting "what is my IP" backends ([`AddressLookup`])
//! - Running `curl` per family ([`CommandLookup`])
//! - Fetching over HTTP in-process ([`ReqwestLookup`])
//! - Validating and time-limiting lookups ([`PublicIpResolver`])
//! - Error handling ([`LookupError`], [`ResolveError`])

mod client;
mod command;
mod error;
mod resolver;

pub use client::ReqwestLookup;
pub use command::CommandLookup;
pub use error::{LookupError, ResolveError};
pub use resolver::{AddressLookup, PublicAddressResult, PublicIpResolver, check_output};

/// A lookup backend chosen at runtime.
///
/// Lets the binary pick a backend from configuration while the
/// coordinator stays generic over a single concrete type.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Shell out to `curl`.
    Command(CommandLookup),
    /// Use the in-process HTTP client.
    Http(ReqwestLookup),
}

impl AddressLookup for Backend {
    async fn lookup(
        &self,
        family: crate::network::AddressFamily,
    ) -> Result<String, LookupError> {
        match self {
            Self::Command(lookup) => lookup.lookup(family).await,
            Self::Http(lookup) => lookup.lookup(family).await,
        }
    }
}
