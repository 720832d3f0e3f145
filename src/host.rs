//! Host parsing: bracketed IPv6 literals, opaque hosts for non-special
//! schemes, and percent-decoded domains with an IPv4 fallthrough.

use crate::character_sets::{is_forbidden_domain_byte, is_forbidden_host_byte};
use crate::compat::String;
use crate::error::{ParseError, Result};
use crate::ipv4::{parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::unicode::idna::{LowercaseToAscii, ToAscii};
use crate::unicode::percent_encode::{pct_decode_lossy, pct_encode_into, C0_CONTROL};

/// A parsed host, kept structured until serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host {
    /// ASCII domain, already run through the domain transform.
    Domain(String),
    /// IPv4 address folded to its 32-bit value.
    Ipv4(u32),
    /// IPv6 address as eight 16-bit pieces.
    Ipv6([u16; 8]),
    /// Host of a non-special URL, percent-encoded byte-for-byte.
    Opaque(String),
    /// The empty host (`file://` and friends).
    Empty,
}

impl Host {
    pub fn is_empty(&self) -> bool {
        match self {
            Host::Empty => true,
            Host::Domain(host) | Host::Opaque(host) => host.is_empty(),
            Host::Ipv4(_) | Host::Ipv6(_) => false,
        }
    }
}

impl core::fmt::Display for Host {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Host::Domain(host) | Host::Opaque(host) => f.write_str(host),
            Host::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Host::Ipv6(pieces) => write!(f, "[{}]", serialize_ipv6(pieces)),
            Host::Empty => Ok(()),
        }
    }
}

/// Parse a host with the default lowercase domain transform.
pub fn parse_host(input: &[u8], is_not_special: bool, validation_error: &mut bool) -> Result<Host> {
    parse_host_with(input, is_not_special, validation_error, &LowercaseToAscii)
}

/// Parse a host with a caller-supplied domain transform.
pub fn parse_host_with(
    input: &[u8],
    is_not_special: bool,
    validation_error: &mut bool,
    to_ascii: &dyn ToAscii,
) -> Result<Host> {
    if input.is_empty() {
        return Ok(Host::Empty);
    }

    if input[0] == b'[' {
        if input[input.len() - 1] != b']' {
            *validation_error = true;
            return Err(ParseError::InvalidHost);
        }
        return parse_ipv6(&input[1..input.len() - 1]).map(Host::Ipv6);
    }

    if is_not_special {
        return parse_opaque_host(input);
    }

    let (decoded, flagged) = pct_decode_lossy(input);
    *validation_error |= flagged;

    let domain = to_ascii.to_ascii(&decoded)?;
    if domain.bytes().any(is_forbidden_domain_byte) {
        *validation_error = true;
        return Err(ParseError::InvalidHost);
    }

    match parse_ipv4(&domain, validation_error)? {
        Some(address) => Ok(Host::Ipv4(address)),
        None => Ok(Host::Domain(domain)),
    }
}

fn parse_opaque_host(input: &[u8]) -> Result<Host> {
    if input.iter().any(|&b| is_forbidden_host_byte(b)) {
        return Err(ParseError::InvalidHost);
    }
    let mut output = String::with_capacity(input.len());
    pct_encode_into(&mut output, input, C0_CONTROL);
    Ok(Host::Opaque(output))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(input: &[u8], is_not_special: bool) -> Result<Host> {
        let mut flagged = false;
        parse_host(input, is_not_special, &mut flagged)
    }

    #[test]
    fn test_parse_domain_lowercases() {
        assert_eq!(
            parse(b"Example.COM", false).unwrap(),
            Host::Domain("example.com".into())
        );
    }

    #[test]
    fn test_parse_domain_decodes_percent_escapes() {
        assert_eq!(
            parse(b"ex%61mple.com", false).unwrap(),
            Host::Domain("example.com".into())
        );
    }

    #[test]
    fn test_parse_domain_rejects_forbidden_bytes() {
        assert!(parse(b"ex ample.com", false).is_err());
        assert!(parse(b"a%2Fb", false).is_err());
        assert!(parse(b"a%00b", false).is_err());
    }

    #[test]
    fn test_parse_ipv4_host() {
        assert_eq!(parse(b"127.0.0.1", false).unwrap(), Host::Ipv4(0x7F000001));
        assert_eq!(parse(b"0x7f.1", false).unwrap(), Host::Ipv4(0x7F000001));
        assert!(parse(b"256.256.256.256", false).is_err());
    }

    #[test]
    fn test_parse_ipv6_host() {
        assert_eq!(
            parse(b"[::1]", false).unwrap(),
            Host::Ipv6([0, 0, 0, 0, 0, 0, 0, 1])
        );
        assert!(parse(b"[::1", false).is_err());
        assert!(parse(b"[]", false).is_err());
    }

    #[test]
    fn test_parse_opaque_host() {
        // opaque hosts keep their case and get byte-wise encoding
        assert_eq!(parse(b"Host", true).unwrap(), Host::Opaque("Host".into()));
        assert_eq!(
            parse(b"a%62c", true).unwrap(),
            Host::Opaque("a%62c".into())
        );
        assert!(parse(b"a b", true).is_err());
        assert!(parse(b"a\\b", true).is_err());
    }

    #[test]
    fn test_empty_host() {
        assert_eq!(parse(b"", false).unwrap(), Host::Empty);
        assert!(Host::Empty.is_empty());
        assert!(Host::Opaque(String::new()).is_empty());
        assert!(!Host::Ipv4(0).is_empty());
    }

    #[test]
    fn test_host_display() {
        assert_eq!(Host::Domain("example.com".into()).to_string(), "example.com");
        assert_eq!(Host::Ipv4(0x7F000001).to_string(), "127.0.0.1");
        assert_eq!(
            Host::Ipv6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]).to_string(),
            "[2001:db8::1]"
        );
        assert_eq!(Host::Empty.to_string(), "");
    }
}
