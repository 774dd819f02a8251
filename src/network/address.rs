//! Core network types for discovered addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// IP address family.
///
/// Used both to tag interface addresses and to select which family a
/// public lookup is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// IPv4 addresses.
    V4,
    /// IPv6 addresses.
    V6,
}

impl AddressFamily {
    /// Both families, IPv4 first.
    pub const ALL: [Self; 2] = [Self::V4, Self::V6];

    /// Returns true if `s` is syntactically valid for this family.
    #[must_use]
    pub fn validate(self, s: &str) -> bool {
        match self {
            Self::V4 => super::is_valid_ipv4(s),
            Self::V6 => super::is_valid_ipv6(s),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// A single address discovered on a named interface.
///
/// Addresses are kept as the text the listing reported (zone suffix
/// stripped), since that is exactly what gets displayed and copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddress {
    /// The interface name (e.g., "en0").
    pub interface_name: String,
    /// The address text.
    pub address: String,
    /// Which family the address belongs to.
    pub family: AddressFamily,
}

impl InterfaceAddress {
    /// Creates a new interface address record.
    #[must_use]
    pub fn new(
        interface_name: impl Into<String>,
        address: impl Into<String>,
        family: AddressFamily,
    ) -> Self {
        Self {
            interface_name: interface_name.into(),
            address: address.into(),
            family,
        }
    }

    /// Creates an IPv4 record.
    #[must_use]
    pub fn v4(interface_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(interface_name, address, AddressFamily::V4)
    }

    /// Creates an IPv6 record.
    #[must_use]
    pub fn v6(interface_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::new(interface_name, address, AddressFamily::V6)
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.interface_name, self.address)
    }
}
