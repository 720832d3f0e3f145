//! IPv4 host parsing in the WHATWG numeric form: up to four dotted parts in
//! decimal, octal, or hexadecimal, the last part folding into however many
//! bytes remain.

use crate::compat::{format, String, Vec};
use crate::error::{ParseError, Result};

/// Try to read a candidate domain as an IPv4 address.
///
/// `Ok(Some(address))` when the input is numeric, `Ok(None)` when it is not
/// and should stay a domain, `Err` when it is numeric but out of range.
pub fn parse_ipv4(input: &str, validation_error: &mut bool) -> Result<Option<u32>> {
    let mut parts: Vec<&str> = input.split('.').collect();

    // A single trailing dot is tolerated
    if parts.last() == Some(&"") {
        *validation_error = true;
        if parts.len() > 1 {
            parts.pop();
        }
    }

    if parts.len() > 4 {
        return Ok(None);
    }

    let mut numbers: Vec<u64> = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() {
            return Ok(None);
        }
        match parse_ipv4_number(part) {
            Some(number) => numbers.push(number),
            None => return Ok(None),
        }
    }

    let count = numbers.len();
    if numbers[..count - 1].iter().any(|&number| number > 255) {
        return Err(ParseError::InvalidHost);
    }
    if numbers[count - 1] >= 256u64.pow(5 - count as u32) {
        return Err(ParseError::InvalidHost);
    }

    let mut address = numbers[count - 1];
    for (i, &number) in numbers[..count - 1].iter().enumerate() {
        address += number * 256u64.pow(3 - i as u32);
    }
    Ok(Some(address as u32))
}

/// Parse one dotted part. The radix comes from the prefix: `0x`/`0X` is
/// hexadecimal, a leading zero is octal, anything else decimal. An empty
/// string after prefix stripping is zero.
fn parse_ipv4_number(part: &str) -> Option<u64> {
    let bytes = part.as_bytes();
    let (digits, radix) = if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'x' {
        (&part[2..], 16)
    } else if bytes.len() >= 2 && bytes[0] == b'0' {
        (&part[1..], 8)
    } else {
        (part, 10)
    };

    if digits.is_empty() {
        return Some(0);
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Dotted-decimal rendering, network byte order.
pub fn serialize_ipv4(address: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (address >> 24) & 0xFF,
        (address >> 16) & 0xFF,
        (address >> 8) & 0xFF,
        address & 0xFF
    )
}
