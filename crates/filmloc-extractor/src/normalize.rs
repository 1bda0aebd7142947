//! Merging, cleaning and field derivation for one page's candidate phrases.
//!
//! Field derivation is a comma-split heuristic, not a gazetteer lookup. It
//! mis-assigns fields for phrases that are not shaped "city, region,
//! country" (trailing coordinates land in `country`), and that output is
//! kept as-is.

use std::collections::HashSet;

use filmloc_core::{Coordinates, ExtractionLimits};

use crate::coords::CoordinateParser;
use crate::dom::collapse_whitespace;
use crate::strategies::{CandidatePhrase, Strategy};

/// Phrases shorter than this (in characters) after cleanup are dropped.
pub const MIN_PHRASE_CHARS: usize = 3;

/// One cleaned, deduplicated phrase with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLocation {
    pub location_text: String,
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Strategy of the first occurrence, the one that survived dedup.
    pub strategy: Strategy,
}

/// Comma-split fields of a phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFields {
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// Normalizer output for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedPage {
    /// Record-bound locations, capped at `max_records_per_page`.
    pub locations: Vec<NormalizedLocation>,
    /// Every kept phrase, capped at `max_audit_locations`.
    pub phrases: Vec<String>,
}

/// Collapse whitespace runs and trim; `None` when the result is too short.
#[must_use]
pub fn normalize_phrase(text: &str) -> Option<String> {
    let collapsed = collapse_whitespace(text);
    (collapsed.chars().count() >= MIN_PHRASE_CHARS).then_some(collapsed)
}

/// Derive city/region/country from a comma-split of `phrase`.
///
/// One segment is the city; two are city and country; three or more are
/// city, region and the remaining segments rejoined as country. Empty
/// segments are ignored, and a phrase with no non-empty segment becomes the
/// city verbatim.
#[must_use]
pub fn split_fields(phrase: &str) -> LocationFields {
    let parts: Vec<&str> = phrase
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [] => LocationFields {
            city: phrase.to_string(),
            region: None,
            country: None,
        },
        [city] => LocationFields {
            city: (*city).to_string(),
            region: None,
            country: None,
        },
        [city, country] => LocationFields {
            city: (*city).to_string(),
            region: None,
            country: Some((*country).to_string()),
        },
        [city, region, rest @ ..] => LocationFields {
            city: (*city).to_string(),
            region: Some((*region).to_string()),
            country: Some(rest.join(", ")),
        },
    }
}

/// Merge candidates in strategy priority order, clean and deduplicate them,
/// and derive fields and coordinates for each kept phrase.
///
/// Candidates are stably sorted by [`Strategy`], so each strategy's internal
/// order is preserved. The first occurrence of a phrase (compared
/// case-insensitively after whitespace collapse) wins.
#[must_use]
pub fn normalize(
    mut candidates: Vec<CandidatePhrase>,
    parser: &CoordinateParser,
    limits: &ExtractionLimits,
) -> NormalizedPage {
    candidates.sort_by_key(|candidate| candidate.strategy);

    let keep = limits.max_audit_locations.max(limits.max_records_per_page);
    let mut seen = HashSet::new();
    let mut kept: Vec<(String, Strategy)> = Vec::new();

    for candidate in candidates {
        if kept.len() >= keep {
            break;
        }
        let Some(phrase) = normalize_phrase(&candidate.text) else {
            continue;
        };
        if seen.insert(phrase.to_lowercase()) {
            kept.push((phrase, candidate.strategy));
        }
    }

    let locations = kept
        .iter()
        .take(limits.max_records_per_page)
        .map(|(phrase, strategy)| {
            let fields = split_fields(phrase);
            NormalizedLocation {
                location_text: phrase.clone(),
                city: fields.city,
                region: fields.region,
                country: fields.country,
                coordinates: parser.parse(phrase),
                strategy: *strategy,
            }
        })
        .collect();

    let phrases = kept
        .into_iter()
        .take(limits.max_audit_locations)
        .map(|(phrase, _)| phrase)
        .collect();

    NormalizedPage { locations, phrases }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
