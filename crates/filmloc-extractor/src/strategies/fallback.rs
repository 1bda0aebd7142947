//! Strategy 4: keyword scan over every paragraph, list item and table cell.
//!
//! Coarse and noisy. The orchestrator only runs it when nothing else on the
//! page produced a candidate.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::dom::inline_text;

static TEXT_BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, li, td").expect("valid selector"));

/// Lowercase keywords; a block is kept when its text contains any of them.
pub const FALLBACK_KEYWORDS: [&str; 5] = [
    "filming location",
    "filming locations",
    "locations used",
    "location",
    "locations",
];

/// Full text of every `p`, `li` and `td` mentioning a location keyword, in
/// document order.
#[must_use]
pub fn scan_paragraphs(document: &Html) -> Vec<String> {
    document
        .select(&TEXT_BLOCK_SELECTOR)
        .map(inline_text)
        .filter(|text| {
            let lowered = text.to_lowercase();
            FALLBACK_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        })
        .collect()
}
