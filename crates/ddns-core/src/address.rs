//! Address normalization for record comparison
//!
//! Record content comes back from the provider as free text. It is compared
//! to the resolved IP as a parsed [`IpAddr`], so different spellings of the
//! same IPv6 address are equal.

use std::net::IpAddr;

/// Parse record content as an IP address
///
/// Surrounding whitespace and a trailing dot are ignored. IPv6 hex digits may
/// be in any case. Returns `None` when the content is not an IP address.
pub fn parse_content(content: &str) -> Option<IpAddr> {
    content.trim().trim_end_matches('.').parse().ok()
}

/// Whether record content already points at `ip`
pub fn content_matches(content: &str, ip: &IpAddr) -> bool {
    parse_content(content).is_some_and(|current| current == *ip)
}

/// Canonical textual form written to the provider
///
/// IPv6 addresses use the compressed lowercase form (RFC 5952).
pub fn canonical(ip: &IpAddr) -> String {
    ip.to_string()
}
