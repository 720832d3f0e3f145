mod context;
mod state;

pub use state::State;

use crate::error::Result;
use crate::url_record::UrlRecord;
use context::ParserContext;

/// Parse an absolute or relative URL against an optional base.
///
/// # Errors
///
/// Returns a [`crate::ParseError`] when the input has no recoverable
/// interpretation: a missing scheme without a base, an empty required host,
/// a malformed IP literal, or an out-of-range port.
pub fn parse(input: &str, base: Option<&UrlRecord>) -> Result<UrlRecord> {
    basic_parse(input, base, None, None)
}

/// The full parser contract: optionally continue from an existing record
/// and enter the machine at a specific state.
///
/// This is the entry point component setters use: re-parse one component of
/// `url` by passing the matching `state_override`, and the machine exits
/// early once that component is committed.
///
/// # Errors
///
/// Same failure modes as [`parse`], plus the override-mode rejections
/// (e.g. a scheme change across the special/non-special line).
pub fn basic_parse(
    input: &str,
    base: Option<&UrlRecord>,
    url: Option<UrlRecord>,
    state_override: Option<State>,
) -> Result<UrlRecord> {
    ParserContext::new(input, base, url, state_override).run()
}
