/// Parser states, one per state of the WHATWG URL parsing algorithm.
///
/// Setters enter the machine at a specific state via the `state_override`
/// argument of `basic_parse` and exit early once that component is
/// re-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Scheme start state
    SchemeStart,
    /// Scheme state
    Scheme,
    /// No scheme state
    NoScheme,
    /// Special relative or authority state
    SpecialRelativeOrAuthority,
    /// Path or authority state
    PathOrAuthority,
    /// Relative state
    Relative,
    /// Relative slash state
    RelativeSlash,
    /// Special authority slashes state
    SpecialAuthoritySlashes,
    /// Special authority ignore slashes state
    SpecialAuthorityIgnoreSlashes,
    /// Authority state
    Authority,
    /// Host state
    Host,
    /// Hostname state (same handler as Host; earlier override exit)
    Hostname,
    /// Port state
    Port,
    /// File state
    File,
    /// File slash state
    FileSlash,
    /// File host state
    FileHost,
    /// Path start state
    PathStart,
    /// Path state
    Path,
    /// Opaque path state for cannot-be-a-base URLs
    CannotBeABaseUrlPath,
    /// Query state
    Query,
    /// Fragment state
    Fragment,
}
