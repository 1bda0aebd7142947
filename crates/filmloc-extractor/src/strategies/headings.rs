//! Strategy 2: content following "filming location" headings.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::dom::{block_text, inline_text, is_heading};
use crate::segment::segment;

static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, h4").expect("valid selector"));

const HEADING_LABEL: &str = "filming location";

/// Collect phrases from the siblings that follow every heading (levels 2-4)
/// mentioning "filming location".
///
/// The walk after each heading stops at the next heading or after
/// `max_steps` sibling nodes, whichever comes first.
#[must_use]
pub fn extract_from_headings(document: &Html, max_steps: usize) -> Vec<String> {
    let mut phrases = Vec::new();

    for heading in document.select(&HEADING_SELECTOR) {
        if !inline_text(heading).to_lowercase().contains(HEADING_LABEL) {
            continue;
        }

        // Wiki skins wrap the heading in a div; the section content is a
        // sibling of the wrapper, not of the heading itself.
        let anchor = heading
            .parent()
            .filter(|parent| is_heading(*parent))
            .unwrap_or(*heading);

        let mut section_text = String::new();
        for sibling in anchor.next_siblings().take(max_steps) {
            if is_heading(sibling) {
                break;
            }
            section_text.push_str(&block_text(sibling));
            section_text.push('\n');
        }

        phrases.extend(segment(&section_text).map(str::to_string));
    }

    phrases
}
