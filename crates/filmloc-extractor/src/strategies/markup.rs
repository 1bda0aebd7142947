//! Strategy 1: "Filming locations" section of raw wiki markup.
//!
//! The section body is run through a fixed pipeline of independent rewrite
//! passes and then split into candidate lines.

use std::borrow::Cow;
use std::sync::LazyLock;

use filmloc_core::ExtractionLimits;
use regex::Regex;

static FILMING_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*=+[ \t]*filming[ \t]+locations?[ \t]*=+[ \t\r]*$")
        .expect("valid regex")
});

static ANY_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*=+[^=\r\n]+=+[ \t\r]*$").expect("valid regex"));

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'{2,}").expect("valid regex"));

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^{}]*\}\}").expect("valid regex"));

static EXTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[https?://[^\s\]]+(?:[ \t]+([^\]]*))?\]").expect("valid regex")
});

static INTERNAL_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]|]*)(?:\|([^\[\]]*))?\]\]").expect("valid regex"));

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<ref[^>/]*/>|<ref[^>]*>.*?</ref>|<!--.*?-->").expect("valid regex")
});

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*#:;]+\s*").expect("valid regex"));

/// Nested templates are peeled one level per iteration.
const MAX_TEMPLATE_DEPTH: usize = 8;

/// A single text rewrite in the cleanup pipeline.
pub type CleanupPass = fn(&str) -> String;

/// Cleanup passes in application order.
pub const CLEANUP_PASSES: [(&str, CleanupPass); 5] = [
    ("strip_references", strip_references),
    ("strip_emphasis", strip_emphasis),
    ("strip_templates", strip_templates),
    ("strip_external_links", strip_external_links),
    ("rewrite_internal_links", rewrite_internal_links),
];

/// Extract candidate lines from the "Filming locations" section of `markup`.
///
/// Returns an empty list when the markup is absent or has no such section.
#[must_use]
pub fn extract_from_markup(markup: Option<&str>, limits: &ExtractionLimits) -> Vec<String> {
    let Some(section) = markup.and_then(find_filming_section) else {
        return Vec::new();
    };

    let cleaned = clean_markup(section);
    let length_range = limits.min_markup_line_chars..=limits.max_markup_line_chars;

    cleaned
        .lines()
        .map(|line| LIST_MARKER_RE.replace(line.trim(), ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .filter(|line| length_range.contains(&line.chars().count()))
        .take(limits.max_markup_lines)
        .collect()
}

/// Body of the first "Filming locations" section, up to the next heading of
/// any level.
#[must_use]
pub fn find_filming_section(markup: &str) -> Option<&str> {
    let heading = FILMING_HEADING_RE.find(markup)?;
    let body = &markup[heading.end()..];
    let end = ANY_HEADING_RE.find(body).map_or(body.len(), |m| m.start());
    Some(&body[..end])
}

/// Run every pass in [`CLEANUP_PASSES`] over `text`.
#[must_use]
pub fn clean_markup(text: &str) -> String {
    CLEANUP_PASSES
        .iter()
        .fold(text.to_string(), |acc, (_, pass)| pass(&acc))
}

/// Remove `<ref>` citations and HTML comments.
#[must_use]
pub fn strip_references(text: &str) -> String {
    REFERENCE_RE.replace_all(text, "").into_owned()
}

/// Remove bold/italic quote runs (`''`, `'''`, `'''''`).
///
/// A bare `''` right after a digit is a seconds mark (`38''N`) and is kept.
#[must_use]
pub fn strip_emphasis(text: &str) -> String {
    EMPHASIS_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let run = &caps[0];
            let after_digit = text[..caps.get(0).map_or(0, |m| m.start())]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit());
            if after_digit && run.len() == 2 {
                run.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Remove `{{...}}` template invocations, innermost first.
#[must_use]
pub fn strip_templates(text: &str) -> String {
    let mut current = Cow::Borrowed(text);
    for _ in 0..MAX_TEMPLATE_DEPTH {
        if !TEMPLATE_RE.is_match(&current) {
            break;
        }
        current = Cow::Owned(TEMPLATE_RE.replace_all(&current, "").into_owned());
    }
    current.into_owned()
}

/// Replace `[http(s)://target label]` with its label, or drop it when
/// unlabelled.
#[must_use]
pub fn strip_external_links(text: &str) -> String {
    EXTERNAL_LINK_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            caps.get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

/// Replace `[[target|display]]` with the display text, falling back to the
/// target when there is no display part.
#[must_use]
pub fn rewrite_internal_links(text: &str) -> String {
    INTERNAL_LINK_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let display = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            if display.is_empty() {
                caps.get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default()
            } else {
                display.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
