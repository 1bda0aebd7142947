//! Extraction orchestrator: runs the strategies for one page and stamps the
//! normalized result into records plus an audit snapshot.

use chrono::Utc;
use filmloc_core::{
    AppConfig, ExtractionLimits, LayoutConfig, LocationRecord, MovieMeta, PageAuditSnapshot,
};

use crate::coords::CoordinateParser;
use crate::error::ExtractorError;
use crate::normalize::normalize;
use crate::page::{derive_title, derive_year, PageContext};
use crate::strategies::{
    compile_layouts, extract_from_headings, extract_from_known_layout, extract_from_markup,
    scan_paragraphs, CandidatePhrase, CompiledLayout, Strategy,
};

/// A strategy step: page in, raw phrases out. `found_so_far` counts the
/// rendered-document candidates produced by earlier steps.
type StrategyFn = fn(&Extractor, &PageContext<'_>, usize) -> Vec<String>;

/// Steps in run order. Rendered-document strategies cascade first; markup
/// runs last and is merged ahead of them by [`Strategy`] priority.
const PIPELINE: [(Strategy, StrategyFn); 4] = [
    (Strategy::Headings, run_headings),
    (Strategy::Layout, run_layout),
    (Strategy::Fallback, run_fallback),
    (Strategy::Markup, run_markup),
];

/// Records and audit snapshot for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub records: Vec<LocationRecord>,
    pub audit: PageAuditSnapshot,
}

/// Runs every extraction strategy against a page.
///
/// Holds no per-page state; one instance can serve any number of pages
/// concurrently.
#[derive(Debug)]
pub struct Extractor {
    limits: ExtractionLimits,
    parser: CoordinateParser,
    use_raw_markup: bool,
    layouts: Vec<CompiledLayout>,
}

impl Extractor {
    /// # Errors
    ///
    /// Returns [`ExtractorError::InvalidSelector`] or
    /// [`ExtractorError::InvalidPathPattern`] when a layout fails to compile.
    pub fn new(
        limits: ExtractionLimits,
        validate_coordinates: bool,
        use_raw_markup: bool,
        layouts: &[LayoutConfig],
    ) -> Result<Self, ExtractorError> {
        Ok(Self {
            limits,
            parser: CoordinateParser::new(validate_coordinates),
            use_raw_markup,
            layouts: compile_layouts(layouts)?,
        })
    }

    /// Build an extractor from the application config and layout registry.
    ///
    /// # Errors
    ///
    /// Propagates layout compilation errors from [`Extractor::new`].
    pub fn from_config(
        config: &AppConfig,
        layouts: &[LayoutConfig],
    ) -> Result<Self, ExtractorError> {
        Self::new(
            config.limits,
            config.validate_coordinates,
            config.use_raw_markup,
            layouts,
        )
    }

    /// Run every strategy step and tag each phrase with its origin.
    #[must_use]
    pub fn candidates(&self, ctx: &PageContext<'_>) -> Vec<CandidatePhrase> {
        let mut candidates = Vec::new();
        let mut found_so_far = 0;

        for (strategy, run) in PIPELINE {
            let phrases = run(self, ctx, found_so_far);
            if phrases.is_empty() {
                continue;
            }
            tracing::debug!(
                url = ctx.url,
                %strategy,
                count = phrases.len(),
                "strategy produced candidates"
            );
            if strategy != Strategy::Markup {
                found_so_far += phrases.len();
            }
            candidates.extend(
                phrases
                    .into_iter()
                    .map(|text| CandidatePhrase::new(text, strategy)),
            );
        }

        candidates
    }

    /// Extract, normalize and stamp the filming locations of one page.
    ///
    /// Never fails: a page with no recognisable locations yields zero
    /// records and an audit snapshot with an empty location list.
    #[must_use]
    pub fn extract_page(&self, ctx: &PageContext<'_>, meta: &MovieMeta) -> PageExtraction {
        let title = derive_title(ctx.document, meta);
        let year = derive_year(&title, meta);
        let extracted_at = Utc::now();

        let normalized = normalize(self.candidates(ctx), &self.parser, &self.limits);

        let records: Vec<LocationRecord> = normalized
            .locations
            .into_iter()
            .map(|loc| {
                tracing::debug!(
                    url = ctx.url,
                    strategy = %loc.strategy,
                    location = %loc.location_text,
                    "location kept"
                );
                LocationRecord {
                    movie_title: title.clone(),
                    year: year.clone(),
                    location_text: loc.location_text,
                    city: loc.city,
                    region: loc.region,
                    country: loc.country,
                    coordinates: loc.coordinates,
                    source_url: ctx.url.to_string(),
                    extracted_at,
                }
            })
            .collect();

        tracing::info!(
            url = ctx.url,
            title = %title,
            records = records.len(),
            "page extracted"
        );

        PageExtraction {
            records,
            audit: PageAuditSnapshot {
                url: ctx.url.to_string(),
                title,
                extracted_locations: normalized.phrases,
                timestamp: extracted_at,
            },
        }
    }
}

fn run_headings(ex: &Extractor, ctx: &PageContext<'_>, _found_so_far: usize) -> Vec<String> {
    extract_from_headings(ctx.document, ex.limits.max_sibling_steps)
}

fn run_layout(ex: &Extractor, ctx: &PageContext<'_>, found_so_far: usize) -> Vec<String> {
    extract_from_known_layout(ctx.document, ctx.url, &ex.layouts, found_so_far)
}

fn run_fallback(_ex: &Extractor, ctx: &PageContext<'_>, found_so_far: usize) -> Vec<String> {
    if found_so_far > 0 {
        return Vec::new();
    }
    scan_paragraphs(ctx.document)
}

fn run_markup(ex: &Extractor, ctx: &PageContext<'_>, _found_so_far: usize) -> Vec<String> {
    if !ex.use_raw_markup {
        return Vec::new();
    }
    extract_from_markup(ctx.raw_markup, &ex.limits)
}
