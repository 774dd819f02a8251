//! Syntactic checks for address text returned by external tools.
//!
//! These are sieves for untrusted output, not full RFC parsers: the IPv6
//! check in particular accepts IPv4-mapped forms and some malformed
//! strings, while still rejecting HTML or prose error bodies.

/// Maximum length (exclusive) accepted for IPv6 text.
const IPV6_MAX_LEN: usize = 50;

/// Minimum length (exclusive) accepted for IPv6 text.
const IPV6_MIN_LEN: usize = 2;

/// Returns true if `s` is four dot-separated decimal octets in `0..=255`.
///
/// Each component must consist solely of ASCII digits; signs, whitespace
/// and empty components are rejected.
///
/// # Examples
///
/// ```
/// use shownet::network::is_valid_ipv4;
///
/// assert!(is_valid_ipv4("1.2.3.4"));
/// assert!(!is_valid_ipv4("256.1.1.1"));
/// assert!(!is_valid_ipv4("1.2.3"));
/// ```
#[must_use]
pub fn is_valid_ipv4(s: &str) -> bool {
    let components: Vec<&str> = s.split('.').collect();
    components.len() == 4 && components.iter().all(|c| is_octet(c))
}

fn is_octet(component: &str) -> bool {
    !component.is_empty()
        && component.bytes().all(|b| b.is_ascii_digit())
        && component.parse::<u32>().is_ok_and(|n| n <= 255)
}

/// Returns true if `s` looks like IPv6 text.
///
/// Requires at least one colon, no angle brackets, a length strictly
/// between 2 and 50, and only hex digits, colons and dots.
///
/// # Examples
///
/// ```
/// use shownet::network::is_valid_ipv6;
///
/// assert!(is_valid_ipv6("2001:db8::1"));
/// assert!(is_valid_ipv6("::ffff:192.0.2.1"));
/// assert!(!is_valid_ipv6("<html>"));
/// ```
#[must_use]
pub fn is_valid_ipv6(s: &str) -> bool {
    if !s.contains(':') || s.contains('<') || s.contains('>') {
        return false;
    }

    let len = s.chars().count();
    if len <= IPV6_MIN_LEN || len >= IPV6_MAX_LEN {
        return false;
    }

    s.chars().all(|c| c.is_ascii_hexdigit() || c == ':' || c == '.')
}
