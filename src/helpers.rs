use crate::compat::{Cow, String, Vec};

/// Bytes stripped from the ends of raw input before any state runs:
/// C-locale whitespace plus NUL, EOT, DC2, ESC, US.
fn is_strippable(b: u8) -> bool {
    matches!(b, 0x09..=0x0D | b' ' | 0x00 | 0x04 | 0x12 | 0x1B | 0x1F)
}

/// Trim strippable bytes from both ends, then drop interior tab/CR/LF.
/// The bool is the advisory flag: true when anything was removed.
/// Borrows when no interior removal is needed (the common case).
pub fn sanitize(input: &[u8]) -> (Cow<'_, [u8]>, bool) {
    let start = input
        .iter()
        .position(|&b| !is_strippable(b))
        .unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|&b| !is_strippable(b))
        .map_or(start, |pos| pos + 1);

    let trimmed = &input[start..end];
    let flagged = trimmed.len() != input.len();

    if memchr::memchr3(b'\t', b'\n', b'\r', trimmed).is_none() {
        return (Cow::Borrowed(trimmed), flagged);
    }

    let cleaned: Vec<u8> = trimmed
        .iter()
        .copied()
        .filter(|&b| !matches!(b, b'\t' | b'\n' | b'\r'))
        .collect();
    (Cow::Owned(cleaned), true)
}

/// Collect bytes already known to be ASCII into an owned string.
pub fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
