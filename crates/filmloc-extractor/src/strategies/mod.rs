//! Candidate extraction strategies, ordered by reliability.
//!
//! Each strategy turns a page into raw candidate phrases. The orchestrator
//! in [`crate::extract`] decides which strategies run and merges their
//! output in [`Strategy`] priority order.

mod fallback;
mod headings;
mod layout;
mod markup;

pub use fallback::{scan_paragraphs, FALLBACK_KEYWORDS};
pub use headings::extract_from_headings;
pub use layout::{compile_layouts, extract_from_known_layout, CompiledLayout, LayoutActivation};
pub use markup::{
    clean_markup, extract_from_markup, find_filming_section, rewrite_internal_links,
    strip_emphasis, strip_external_links, strip_references, strip_templates, CLEANUP_PASSES,
};

/// Origin of a candidate phrase. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strategy {
    /// "Filming locations" section of the raw wiki markup.
    Markup,
    /// Content following a "filming location" heading in the rendered page.
    Headings,
    /// List items of a recognised locations-listing layout.
    Layout,
    /// Keyword scan over every paragraph, list item and table cell.
    Fallback,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Markup => "markup",
            Strategy::Headings => "headings",
            Strategy::Layout => "layout",
            Strategy::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw text fragment suspected of naming a filming location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePhrase {
    pub text: String,
    pub strategy: Strategy,
}

impl CandidatePhrase {
    #[must_use]
    pub fn new(text: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            text: text.into(),
            strategy,
        }
    }
}
