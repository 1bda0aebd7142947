//! Crude boundary splitting of free text into candidate phrases.

use std::sync::LazyLock;

use regex::Regex;

/// Newlines, semicolons, em/en dashes, and hyphens with whitespace on both
/// sides. Hyphens inside words (`Saint-Tropez`) and sign prefixes
/// (`-122.4`) are not separators.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n;\x{2014}\x{2013}]+|\s+-+\s+").expect("valid regex"));

/// Split `text` into trimmed, non-empty pieces.
///
/// The returned iterator borrows `text` and is recomputed on every call.
pub fn segment(text: &str) -> impl Iterator<Item = &str> + '_ {
    SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}
