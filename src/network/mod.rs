//! Network layer for discovering interface addresses.
//!
//! This module provides types and functions for:
//! - Representing discovered addresses ([`InterfaceAddress`], [`AddressFamily`])
//! - Validating address text from external tools ([`is_valid_ipv4`], [`is_valid_ipv6`])
//! - Parsing `ifconfig`-style listings ([`parse_listing`])
//! - Obtaining listings ([`InterfaceSource`], [`CommandSource`]) and
//!   turning them into records ([`discover`])

mod address;
mod command;
mod parser;
mod source;
mod validate;

pub use address::{AddressFamily, InterfaceAddress};
pub use command::CommandSource;
pub use parser::parse_listing;
pub use source::{DiscoveryError, InterfaceSource, discover};
pub use validate::{is_valid_ipv4, is_valid_ipv6};
