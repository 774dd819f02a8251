//! Parser for `ifconfig`-style interface listings.
//!
//! The listing is a sequence of blocks. Each block starts with an
//! unindented header line (`en0: flags=8863<UP,...> mtu 1500`) and is
//! followed by indented detail lines, some of which carry addresses
//! (`\tinet 192.168.1.50 netmask 0xffffff00 ...`,
//! `\tinet6 2001:db8::5 prefixlen 64 ...`).
//!
//! Parsing is a fold over lines: completed records accumulate in order
//! while the current block is held in a pending accumulator that is
//! flushed on the next header and once more at end of input.

use super::{AddressFamily, InterfaceAddress};

/// Keyword preceding an IPv4 address on a detail line.
const INET: &str = "inet";

/// Keyword preceding an IPv6 address on a detail line.
const INET6: &str = "inet6";

const IPV4_LOOPBACK: &str = "127.0.0.1";
const IPV6_LOOPBACK: &str = "::1";
const LINK_LOCAL_PREFIX: &str = "fe80:";

/// Parses a raw interface listing into address records.
///
/// At most one IPv4 and one IPv6 address is kept per interface; when a
/// block lists several of one family the last one wins. Loopback
/// addresses and IPv6 link-local addresses are skipped, and IPv6 zone
/// suffixes (`%en0`) are removed.
///
/// Records come out in the order interfaces first appear, IPv4 before
/// IPv6 within an interface. Interfaces without a usable address produce
/// nothing, so a listing with only loopback yields an empty vector.
///
/// # Examples
///
/// ```
/// use shownet::network::{InterfaceAddress, parse_listing};
///
/// let listing = "en0: flags=8863<UP> mtu 1500\n\tinet 10.0.0.5 netmask 0xffffff00\n";
/// assert_eq!(parse_listing(listing), vec![InterfaceAddress::v4("en0", "10.0.0.5")]);
/// ```
#[must_use]
pub fn parse_listing(text: &str) -> Vec<InterfaceAddress> {
    text.lines()
        .map(classify)
        .fold(Fold::default(), Fold::feed)
        .finish()
}

/// What a single listing line contributes.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Start of a new interface block.
    Header(&'a str),
    /// A usable address for the current block.
    Address(AddressFamily, &'a str),
    /// Anything else, including filtered addresses.
    Ignored,
}

fn classify(line: &str) -> Line<'_> {
    if is_header(line) {
        return Line::Header(interface_name(line));
    }

    if line.contains("inet ") && !line.contains(INET6) {
        return match token_after(line, INET) {
            Some(addr) if addr != IPV4_LOOPBACK => Line::Address(AddressFamily::V4, addr),
            _ => Line::Ignored,
        };
    }

    if line.contains(INET6) {
        return match token_after(line, INET6).map(strip_zone) {
            Some(addr) if addr != IPV6_LOOPBACK && !is_link_local(addr) => {
                Line::Address(AddressFamily::V6, addr)
            }
            _ => Line::Ignored,
        };
    }

    Line::Ignored
}

fn is_header(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('\t') && !line.starts_with(' ')
}

fn interface_name(header: &str) -> &str {
    header.split(':').next().unwrap_or(header).trim()
}

/// Returns the whitespace-separated field that follows `keyword`.
fn token_after<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let mut fields = line.split_whitespace();
    fields.by_ref().find(|f| *f == keyword)?;
    fields.next()
}

fn strip_zone(addr: &str) -> &str {
    addr.split_once('%').map_or(addr, |(head, _)| head)
}

fn is_link_local(addr: &str) -> bool {
    addr.get(..LINK_LOCAL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LINK_LOCAL_PREFIX))
}

/// The interface block currently being read.
#[derive(Debug)]
struct Pending<'a> {
    name: &'a str,
    ipv4: Option<&'a str>,
    ipv6: Option<&'a str>,
}

impl Pending<'_> {
    fn flush_into(self, out: &mut Vec<InterfaceAddress>) {
        if let Some(addr) = self.ipv4 {
            out.push(InterfaceAddress::v4(self.name, addr));
        }
        if let Some(addr) = self.ipv6 {
            out.push(InterfaceAddress::v6(self.name, addr));
        }
    }
}

#[derive(Debug, Default)]
struct Fold<'a> {
    done: Vec<InterfaceAddress>,
    pending: Option<Pending<'a>>,
}

impl<'a> Fold<'a> {
    fn feed(mut self, line: Line<'a>) -> Self {
        match line {
            Line::Header(name) => {
                if let Some(previous) = self.pending.take() {
                    previous.flush_into(&mut self.done);
                }
                self.pending = Some(Pending {
                    name,
                    ipv4: None,
                    ipv6: None,
                });
            }
            // Address lines before the first header have nowhere to go.
            Line::Address(family, addr) => {
                if let Some(pending) = self.pending.as_mut() {
                    match family {
                        AddressFamily::V4 => pending.ipv4 = Some(addr),
                        AddressFamily::V6 => pending.ipv6 = Some(addr),
                    }
                }
            }
            Line::Ignored => {}
        }
        self
    }

    fn finish(mut self) -> Vec<InterfaceAddress> {
        if let Some(last) = self.pending.take() {
            last.flush_into(&mut self.done);
        }
        self.done
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
