#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parser;
mod scheme;
mod unicode;
mod url;
mod url_record;

// Public API
pub use error::{ParseError, Result};
pub use host::{parse_host, parse_host_with, Host};
pub use parser::{basic_parse, parse, State};
pub use scheme::SchemeType;
pub use unicode::idna::{LowercaseToAscii, ToAscii};
#[cfg(feature = "idna")]
pub use unicode::idna::Uts46;
pub use unicode::percent_encode::{
    pct_decode, pct_decode_lossy, pct_encode_into, C0_CONTROL, FRAGMENT, PATH, QUERY, USERINFO,
};
pub use url::Url;
pub use url_record::{serialize, UrlRecord};
