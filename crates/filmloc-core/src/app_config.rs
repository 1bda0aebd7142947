use std::path::PathBuf;

/// Maximum number of sibling nodes walked after a matching heading.
pub const DEFAULT_MAX_SIBLING_STEPS: usize = 200;
/// Maximum number of location records emitted per page.
pub const DEFAULT_MAX_RECORDS_PER_PAGE: usize = 200;
/// Maximum number of phrases kept in a page's audit snapshot.
pub const DEFAULT_MAX_AUDIT_LOCATIONS: usize = 500;
/// Maximum number of candidate lines taken from one markup section.
pub const DEFAULT_MAX_MARKUP_LINES: usize = 200;
/// Shortest markup line (in characters) kept as a candidate.
pub const DEFAULT_MIN_MARKUP_LINE_CHARS: usize = 5;
/// Longest markup line (in characters) kept as a candidate.
pub const DEFAULT_MAX_MARKUP_LINE_CHARS: usize = 400;

/// Bounds that keep a single page's extraction finite on pathological input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_sibling_steps: usize,
    pub max_records_per_page: usize,
    pub max_audit_locations: usize,
    pub max_markup_lines: usize,
    pub min_markup_line_chars: usize,
    pub max_markup_line_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_sibling_steps: DEFAULT_MAX_SIBLING_STEPS,
            max_records_per_page: DEFAULT_MAX_RECORDS_PER_PAGE,
            max_audit_locations: DEFAULT_MAX_AUDIT_LOCATIONS,
            max_markup_lines: DEFAULT_MAX_MARKUP_LINES,
            min_markup_line_chars: DEFAULT_MIN_MARKUP_LINE_CHARS,
            max_markup_line_chars: DEFAULT_MAX_MARKUP_LINE_CHARS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Fetch and parse raw wiki markup for pages that have it.
    pub use_raw_markup: bool,
    /// Discard parsed coordinates outside the valid latitude/longitude ranges.
    pub validate_coordinates: bool,
    pub max_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub layouts_path: Option<PathBuf>,
    pub limits: ExtractionLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            use_raw_markup: true,
            validate_coordinates: false,
            max_concurrency: 4,
            request_timeout_secs: 30,
            user_agent: "filmloc/0.1 (filming-locations)".to_string(),
            output_dir: PathBuf::from("./output"),
            layouts_path: None,
            limits: ExtractionLimits::default(),
        }
    }
}
