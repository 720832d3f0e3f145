//! Percent codec: byte-wise encoding against selectable escape sets, plus
//! strict and lossy decoding.
//!
//! Every byte outside 0x20..=0x7E is escaped no matter which set is in
//! effect; the sets only add printable ASCII to that floor.

use crate::compat::{String, Vec};
use crate::error::{ParseError, Result};
use percent_encoding::{percent_encode, AsciiSet, CONTROLS};

/// C0-control escape set: the always-escaped floor and nothing else.
/// Used for opaque hosts and opaque (cannot-be-a-base) paths.
pub const C0_CONTROL: &AsciiSet = CONTROLS;

/// Fragment escape set.
pub const FRAGMENT: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query escape set.
pub const QUERY: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Path escape set: fragment plus `#`, `?`, `{`, `}`.
pub const PATH: &AsciiSet = &FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');

/// Userinfo escape set: path plus the authority delimiters.
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Append one byte to `out`, escaped as uppercase `%XX` when required.
pub fn pct_encode_byte_into(out: &mut String, byte: u8, set: &'static AsciiSet) {
    for chunk in percent_encode(&[byte], set) {
        out.push_str(chunk);
    }
}

/// Same, but into the parser's raw lexeme buffer.
pub fn pct_encode_byte_to_buffer(out: &mut Vec<u8>, byte: u8, set: &'static AsciiSet) {
    for chunk in percent_encode(&[byte], set) {
        out.extend_from_slice(chunk.as_bytes());
    }
}

/// Encode an entire byte run into `out`.
pub fn pct_encode_into(out: &mut String, bytes: &[u8], set: &'static AsciiSet) {
    for chunk in percent_encode(bytes, set) {
        out.push_str(chunk);
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// True when `input[pos..]` begins a `%XX` escape.
pub fn is_pct_encoded(input: &[u8], pos: usize) -> bool {
    pos + 3 <= input.len()
        && input[pos] == b'%'
        && input[pos + 1].is_ascii_hexdigit()
        && input[pos + 2].is_ascii_hexdigit()
}

/// Strict percent-decode.
///
/// A `%` with fewer than two characters after it is `NotEnoughInput`;
/// non-hex characters after `%` are `NonHexInput`.
pub fn pct_decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            if i + 3 > input.len() {
                return Err(ParseError::NotEnoughInput);
            }
            match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => return Err(ParseError::NonHexInput),
            }
        } else {
            out.push(input[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Lossy percent-decode, as the host parser wants it: a `%` not starting a
/// valid escape passes through literally and only raises the advisory flag.
pub fn pct_decode_lossy(input: &[u8]) -> (Vec<u8>, bool) {
    let mut out = Vec::with_capacity(input.len());
    let mut flagged = false;
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                input.get(i + 1).copied().and_then(hex_value),
                input.get(i + 2).copied().and_then(hex_value),
            ) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
            flagged = true;
        }
        out.push(input[i]);
        i += 1;
    }
    (out, flagged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_byte() {
        let mut out = String::new();
        pct_encode_byte_into(&mut out, b' ', FRAGMENT);
        pct_encode_byte_into(&mut out, b'a', FRAGMENT);
        pct_encode_byte_into(&mut out, 0xC3, FRAGMENT);
        pct_encode_byte_into(&mut out, 0x7F, FRAGMENT);
        assert_eq!(out, "%20a%C3%7F");
    }

    #[test]
    fn test_set_membership() {
        // '?' is escaped in paths but not in queries or fragments
        let mut path = String::new();
        pct_encode_byte_into(&mut path, b'?', PATH);
        assert_eq!(path, "%3F");

        let mut query = String::new();
        pct_encode_byte_into(&mut query, b'?', QUERY);
        assert_eq!(query, "?");

        // '@' only escapes in userinfo
        let mut userinfo = String::new();
        pct_encode_byte_into(&mut userinfo, b'@', USERINFO);
        assert_eq!(userinfo, "%40");
    }

    #[test]
    fn test_strict_decode() {
        assert_eq!(pct_decode(b"a%20b").unwrap(), b"a b");
        assert_eq!(pct_decode(b"%C3%A9").unwrap(), [0xC3, 0xA9]);
        assert_eq!(pct_decode(b"%2").unwrap_err(), ParseError::NotEnoughInput);
        assert_eq!(pct_decode(b"%zz").unwrap_err(), ParseError::NonHexInput);
    }

    #[test]
    fn test_lossy_decode() {
        assert_eq!(pct_decode_lossy(b"a%20b"), (b"a b".to_vec(), false));
        assert_eq!(pct_decode_lossy(b"100%"), (b"100%".to_vec(), true));
        assert_eq!(pct_decode_lossy(b"%x1y"), (b"%x1y".to_vec(), true));
    }

    #[test]
    fn test_is_pct_encoded() {
        assert!(is_pct_encoded(b"%2e", 0));
        assert!(is_pct_encoded(b"a%2Eb", 1));
        assert!(!is_pct_encoded(b"%2", 0));
        assert!(!is_pct_encoded(b"%g0", 0));
        assert!(!is_pct_encoded(b"x", 0));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let mut encoded = String::new();
        pct_encode_into(&mut encoded, &bytes, USERINFO);
        assert_eq!(pct_decode(encoded.as_bytes()).unwrap(), bytes);
    }
}
