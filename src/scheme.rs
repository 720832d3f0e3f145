//! The fixed scheme registry: the special-scheme set and default ports.

/// URL scheme classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    #[default]
    NotSpecial,
    Ftp,
    File,
    Http,
    Https,
    Ws,
    Wss,
}

impl SchemeType {
    /// Check if this is a special scheme
    pub fn is_special(self) -> bool {
        self != Self::NotSpecial
    }

    /// Default port, or `None` for `file` and non-special schemes.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::Ftp => Some(21),
            Self::File | Self::NotSpecial => None,
        }
    }
}

/// Classify a scheme string.
/// Length plus first byte narrow the candidates before a full comparison.
pub fn scheme_type(scheme: &str) -> SchemeType {
    let bytes = scheme.as_bytes();

    match (bytes.len(), bytes.first()) {
        (2, Some(b'w')) if bytes == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if bytes == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if bytes == b"ftp" => SchemeType::Ftp,
        (4, Some(b'h')) if bytes == b"http" => SchemeType::Http,
        (4, Some(b'f')) if bytes == b"file" => SchemeType::File,
        (5, Some(b'h')) if bytes == b"https" => SchemeType::Https,
        _ => SchemeType::NotSpecial,
    }
}

/// Membership in the special set: `ftp`, `file`, `http`, `https`, `ws`, `wss`.
pub fn is_special(scheme: &str) -> bool {
    scheme_type(scheme).is_special()
}

pub fn default_port(scheme: &str) -> Option<u16> {
    scheme_type(scheme).default_port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_type() {
        assert_eq!(scheme_type("http"), SchemeType::Http);
        assert_eq!(scheme_type("https"), SchemeType::Https);
        assert_eq!(scheme_type("ftp"), SchemeType::Ftp);
        assert_eq!(scheme_type("file"), SchemeType::File);
        assert_eq!(scheme_type("custom"), SchemeType::NotSpecial);
        assert_eq!(scheme_type("HTTP"), SchemeType::NotSpecial);
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("ws"), Some(80));
        assert_eq!(default_port("https"), Some(443));
        assert_eq!(default_port("wss"), Some(443));
        assert_eq!(default_port("ftp"), Some(21));
        assert_eq!(default_port("file"), None);
        assert_eq!(default_port("blob"), None);
    }

    #[test]
    fn test_is_special() {
        assert!(is_special("file"));
        assert!(is_special("wss"));
        assert!(!is_special("blob"));
        assert!(!is_special(""));
    }
}
