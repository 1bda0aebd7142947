//! Per-page input and best-effort movie title/year derivation.

use std::sync::LazyLock;

use filmloc_core::MovieMeta;
use regex::Regex;
use scraper::{Html, Selector};

use crate::dom::{collapse_whitespace, first_text};

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("valid selector"));

static OG_TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("valid selector")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid selector"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

/// Suffixes sites append to document titles.
const TITLE_SUFFIXES: [&str; 2] = [" - Wikipedia", " - IMDb"];

/// Immutable input to one extraction run.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub url: &'a str,
    /// Raw wiki markup for the page, when it was available.
    pub raw_markup: Option<&'a str>,
    pub document: &'a Html,
}

impl<'a> PageContext<'a> {
    #[must_use]
    pub fn new(url: &'a str, document: &'a Html) -> Self {
        Self {
            url,
            raw_markup: None,
            document,
        }
    }

    #[must_use]
    pub fn with_markup(mut self, raw_markup: Option<&'a str>) -> Self {
        self.raw_markup = raw_markup;
        self
    }
}

/// Movie title for `document`: the non-empty `meta.title` hint, else the
/// first `h1`, the `og:title` meta tag, or `<title>`. Empty when none exist.
#[must_use]
pub fn derive_title(document: &Html, meta: &MovieMeta) -> String {
    if let Some(hint) = non_empty(meta.title.as_deref()) {
        return hint.to_string();
    }

    let found = first_text(document, &H1_SELECTOR)
        .or_else(|| {
            document
                .select(&OG_TITLE_SELECTOR)
                .filter_map(|el| el.value().attr("content"))
                .map(collapse_whitespace)
                .find(|content| !content.is_empty())
        })
        .or_else(|| first_text(document, &TITLE_SELECTOR))
        .unwrap_or_default();

    strip_site_suffix(&found).to_string()
}

/// Release year: the non-empty `meta.year` hint, else the first 19xx/20xx
/// number in `title`. Empty when neither is present.
#[must_use]
pub fn derive_year(title: &str, meta: &MovieMeta) -> String {
    if let Some(hint) = non_empty(meta.year.as_deref()) {
        return hint.to_string();
    }
    YEAR_RE
        .find(title)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn strip_site_suffix(title: &str) -> &str {
    TITLE_SUFFIXES
        .iter()
        .find_map(|suffix| title.strip_suffix(suffix))
        .unwrap_or(title)
        .trim()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_hints() -> MovieMeta {
        MovieMeta::default()
    }

    #[test]
    fn title_prefers_first_heading() {
        let doc = Html::parse_document(
            r#"<head><title>Ignored - Wikipedia</title></head>
               <body><h1 id="firstHeading">Vertigo (1958 film)</h1></body>"#,
        );
        assert_eq!(derive_title(&doc, &no_hints()), "Vertigo (1958 film)");
    }

    #[test]
    fn title_falls_back_to_og_then_title_tag() {
        let og = Html::parse_document(
            r#"<head><meta property="og:title" content="Vertigo (1958) - IMDb">
               <title>x</title></head>"#,
        );
        assert_eq!(derive_title(&og, &no_hints()), "Vertigo (1958)");

        let plain = Html::parse_document("<head><title>Vertigo - Wikipedia</title></head>");
        assert_eq!(derive_title(&plain, &no_hints()), "Vertigo");
    }

    #[test]
    fn title_is_empty_when_nothing_matches() {
        let doc = Html::parse_document("<p>no title here</p>");
        assert_eq!(derive_title(&doc, &no_hints()), "");
    }

    #[test]
    fn title_hint_takes_precedence() {
        let doc = Html::parse_document("<h1>Vertigo</h1>");
        let meta = MovieMeta {
            title: Some("Psycho".to_string()),
            year: None,
        };
        assert_eq!(derive_title(&doc, &meta), "Psycho");

        let blank = MovieMeta {
            title: Some("   ".to_string()),
            year: None,
        };
        assert_eq!(derive_title(&doc, &blank), "Vertigo");
    }

    #[test]
    fn year_comes_from_title() {
        assert_eq!(derive_year("Vertigo (1958 film)", &no_hints()), "1958");
        assert_eq!(derive_year("Blade Runner 2049", &no_hints()), "2049");
        assert_eq!(derive_year("Vertigo", &no_hints()), "");
        assert_eq!(derive_year("Agent 12345", &no_hints()), "");
    }

    #[test]
    fn year_hint_takes_precedence() {
        let meta = MovieMeta {
            title: None,
            year: Some("1960".to_string()),
        };
        assert_eq!(derive_year("Vertigo (1958 film)", &meta), "1960");
    }
}
