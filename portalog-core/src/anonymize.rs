//! Client-address anonymization.
//!
//! Coarsens a network address by zeroing its least-significant component:
//! records stay partitionable by network prefix for abuse-pattern analysis,
//! but no full host identity is retained.

use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

/// Sentinel stored when the transport layer supplied no usable address.
pub const UNKNOWN_ADDR: &str = "0.0.0.0";

/// Trailing 16-bit group of an IPv6 address, as written.
static TRAILING_HEXTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i):[0-9a-f]{0,4}$").unwrap());

/// Anonymize a candidate client address.
///
/// - **IPv4** `a.b.c.d` → `a.b.c.0` (last octet zeroed)
/// - **IPv6** → the hextet after the final colon becomes `0000`. This is a
///   textual rewrite of the as-given form: abbreviated addresses keep their
///   abbreviation (`2001:db8::1` → `2001:db8::0000`). A valid IPv6 address
///   whose tail is dotted (IPv4-mapped form) has no trailing hextet and
///   passes through unchanged.
/// - anything else (empty, malformed, hostname) → [`UNKNOWN_ADDR`]
///
/// Never fails; a bad address degrades to the sentinel so logging is never
/// the reason a request dies.
pub fn anonymize_addr(raw: &str) -> String {
    if let Ok(v4) = raw.parse::<Ipv4Addr>() {
        let [a, b, c, _] = v4.octets();
        return format!("{a}.{b}.{c}.0");
    }
    if raw.parse::<Ipv6Addr>().is_ok() {
        return TRAILING_HEXTET.replace(raw, ":0000").into_owned();
    }
    UNKNOWN_ADDR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── IPv4 ─────────────────────────────────────────────────────

    #[test]
    fn ipv4_last_octet_zeroed() {
        assert_eq!(anonymize_addr("203.0.113.77"), "203.0.113.0");
    }

    #[test]
    fn ipv4_first_three_octets_preserved() {
        assert_eq!(anonymize_addr("10.0.0.1"), "10.0.0.0");
        assert_eq!(anonymize_addr("172.16.254.255"), "172.16.254.0");
        assert_eq!(anonymize_addr("192.168.1.42"), "192.168.1.0");
    }

    #[test]
    fn already_anonymized_ipv4_unchanged() {
        assert_eq!(anonymize_addr("10.20.30.0"), "10.20.30.0");
    }

    // ── IPv6 ─────────────────────────────────────────────────────

    #[test]
    fn ipv6_abbreviated_keeps_abbreviation() {
        assert_eq!(anonymize_addr("2001:db8::1"), "2001:db8::0000");
    }

    #[test]
    fn ipv6_expanded_form_rewrites_in_place() {
        assert_eq!(
            anonymize_addr("2001:db8:0:0:0:0:0:1"),
            "2001:db8:0:0:0:0:0:0000"
        );
    }

    #[test]
    fn ipv6_full_groups() {
        assert_eq!(
            anonymize_addr("fe80:1:2:3:4:5:6:abcd"),
            "fe80:1:2:3:4:5:6:0000"
        );
    }

    #[test]
    fn ipv6_loopback() {
        assert_eq!(anonymize_addr("::1"), "::0000");
    }

    #[test]
    fn ipv6_uppercase_hextet_replaced() {
        assert_eq!(anonymize_addr("2001:DB8::ABCD"), "2001:DB8::0000");
    }

    #[test]
    fn ipv6_mapped_ipv4_tail_passes_through() {
        // Dotted tail: no trailing hextet to rewrite.
        assert_eq!(anonymize_addr("::ffff:198.51.100.7"), "::ffff:198.51.100.7");
    }

    // ── Invalid input ────────────────────────────────────────────

    #[test]
    fn empty_input_yields_sentinel() {
        assert_eq!(anonymize_addr(""), UNKNOWN_ADDR);
    }

    #[test]
    fn malformed_input_yields_sentinel() {
        assert_eq!(anonymize_addr("not-an-ip"), UNKNOWN_ADDR);
        assert_eq!(anonymize_addr("256.1.1.1"), UNKNOWN_ADDR);
        assert_eq!(anonymize_addr("1.2.3"), UNKNOWN_ADDR);
        assert_eq!(anonymize_addr("2001:db8::zzzz"), UNKNOWN_ADDR);
    }

    #[test]
    fn whitespace_wrapped_input_is_not_parsed() {
        assert_eq!(anonymize_addr(" 203.0.113.77 "), UNKNOWN_ADDR);
    }
}
