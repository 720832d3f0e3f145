use crate::compat::{String, Vec};
use crate::error::{ParseError, Result};

/// Domain-to-ASCII transform applied to percent-decoded host bytes.
///
/// The parser ships with [`LowercaseToAscii`]. A full UTS#46 processor can
/// be substituted without touching the state machine; the `idna` feature
/// provides [`Uts46`] backed by the `idna` crate.
pub trait ToAscii {
    fn to_ascii(&self, domain: &[u8]) -> Result<String>;
}

/// ASCII-lowercasing stand-in for IDNA ToASCII. Non-ASCII bytes pass
/// through unchanged but must still form valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseToAscii;

impl ToAscii for LowercaseToAscii {
    fn to_ascii(&self, domain: &[u8]) -> Result<String> {
        let lowered: Vec<u8> = domain.iter().map(|b| b.to_ascii_lowercase()).collect();
        String::from_utf8(lowered).map_err(|_| ParseError::ConversionFailed)
    }
}

/// UTS#46 ToASCII via the `idna` crate.
#[cfg(feature = "idna")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Uts46;

#[cfg(feature = "idna")]
impl ToAscii for Uts46 {
    fn to_ascii(&self, domain: &[u8]) -> Result<String> {
        let utf8 = core::str::from_utf8(domain).map_err(|_| ParseError::ConversionFailed)?;
        idna::domain_to_ascii(utf8).map_err(|_| ParseError::ConversionFailed)
    }
}
