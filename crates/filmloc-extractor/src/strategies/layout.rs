//! Strategy 3: recognised locations-listing layouts.
//!
//! Listing pages already hold one location per element, so item text is
//! returned as-is without segmentation. Layout selectors are coupled to the
//! site's markup; when a site restructures, this strategy silently returns
//! nothing and the fallback scanner takes over.

use std::collections::HashSet;

use filmloc_core::LayoutConfig;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::dom::inline_text;
use crate::error::ExtractorError;

/// A [`LayoutConfig`] with its pattern and selectors compiled.
#[derive(Debug)]
pub struct CompiledLayout {
    pub name: String,
    config: LayoutConfig,
    path_re: Option<Regex>,
    containers: Vec<Selector>,
    items: Selector,
}

/// Why a layout was applied to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutActivation {
    /// The page URL matches the layout's host and path.
    Url,
    /// A container element is present and no candidates were found yet.
    Container,
}

/// Compile layouts, failing on the first invalid pattern or selector.
///
/// # Errors
///
/// Returns [`ExtractorError::InvalidPathPattern`] or
/// [`ExtractorError::InvalidSelector`] naming the offending layout.
pub fn compile_layouts(layouts: &[LayoutConfig]) -> Result<Vec<CompiledLayout>, ExtractorError> {
    layouts.iter().map(CompiledLayout::compile).collect()
}

impl CompiledLayout {
    fn compile(config: &LayoutConfig) -> Result<Self, ExtractorError> {
        let parse = |selector: &str| {
            Selector::parse(selector).map_err(|e| ExtractorError::InvalidSelector {
                layout: config.name.clone(),
                selector: selector.to_string(),
                reason: e.to_string(),
            })
        };

        let path_re = config
            .path_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|source| ExtractorError::InvalidPathPattern {
                layout: config.name.clone(),
                source,
            })?;

        let containers = config
            .container_selectors
            .iter()
            .map(|s| parse(s.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        // One selector group keeps matches in document order, each element once.
        let item_group = std::iter::once("li")
            .chain(config.item_selectors.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ");
        let items = parse(item_group.as_str())?;

        Ok(Self {
            name: config.name.clone(),
            config: config.clone(),
            path_re,
            containers,
            items,
        })
    }

    /// `true` when `url` parses and matches this layout's host and path.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        let Some(path_re) = &self.path_re else {
            return false;
        };
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let host = parsed.host_str().unwrap_or_default();
        self.config.matches_host(host) && path_re.is_match(parsed.path())
    }

    fn container_elements<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for selector in &self.containers {
            for el in document.select(selector) {
                if seen.insert(el.id()) {
                    found.push(el);
                }
            }
        }
        found
    }

    fn activation(
        &self,
        url: &str,
        has_containers: bool,
        found_so_far: usize,
    ) -> Option<LayoutActivation> {
        if self.matches_url(url) {
            Some(LayoutActivation::Url)
        } else if has_containers && found_so_far == 0 {
            Some(LayoutActivation::Container)
        } else {
            None
        }
    }

    fn collect_items(&self, document: &Html, containers: &[ElementRef<'_>]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();

        let mut push = |el: ElementRef<'_>| {
            if seen.insert(el.id()) {
                let text = inline_text(el);
                if !text.is_empty() {
                    phrases.push(text);
                }
            }
        };

        if containers.is_empty() {
            document.select(&self.items).for_each(&mut push);
        } else {
            for container in containers {
                container.select(&self.items).for_each(&mut push);
            }
        }

        phrases
    }
}

/// Pull item text from the first layout that applies to this page.
///
/// A layout applies when the URL matches it, or when one of its containers
/// is present and `found_so_far` is zero. Items are collected from the
/// containers when present, otherwise from the whole document.
#[must_use]
pub fn extract_from_known_layout(
    document: &Html,
    url: &str,
    layouts: &[CompiledLayout],
    found_so_far: usize,
) -> Vec<String> {
    for layout in layouts {
        let containers = layout.container_elements(document);
        let Some(activation) = layout.activation(url, !containers.is_empty(), found_so_far) else {
            continue;
        };

        let phrases = layout.collect_items(document, &containers);
        tracing::debug!(
            url,
            layout = %layout.name,
            ?activation,
            count = phrases.len(),
            "applied known locations layout"
        );
        return phrases;
    }

    Vec::new()
}
