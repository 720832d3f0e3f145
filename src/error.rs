/// Errors that can occur during URL parsing.
///
/// Ordinals are stable; reordering variants is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Input is not an absolute URL and no usable base was supplied
    InvalidSyntax,
    /// Malformed scheme, or a scheme change rejected in override mode
    InvalidScheme,
    /// Userinfo terminator with nothing between `@` and the host
    InvalidUserInfo,
    /// Empty or malformed host, including bad IP literals and forbidden bytes
    InvalidHost,
    /// Port is not a decimal integer below 2^16
    InvalidPort,
    /// Invalid path component
    InvalidPath,
    /// Invalid query component
    InvalidQuery,
    /// Invalid fragment component
    InvalidFragment,
    /// `%` escape truncated by the end of input
    NotEnoughInput,
    /// `%` escape with non-hex digits
    NonHexInput,
    /// Decoded host bytes do not form a valid domain string
    ConversionFailed,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidSyntax => "Invalid URL syntax",
            Self::InvalidScheme => "Invalid scheme",
            Self::InvalidUserInfo => "Invalid user info",
            Self::InvalidHost => "Invalid host",
            Self::InvalidPort => "Invalid port",
            Self::InvalidPath => "Invalid path",
            Self::InvalidQuery => "Invalid query",
            Self::InvalidFragment => "Invalid fragment",
            Self::NotEnoughInput => "Percent escape cut short",
            Self::NonHexInput => "Percent escape with non-hex input",
            Self::ConversionFailed => "Domain conversion failed",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Result type for URL parsing operations
pub type Result<T> = core::result::Result<T, ParseError>;
