//! Multi-strategy filming-location extraction.
//!
//! Turns one page (rendered document, URL, optional raw wiki markup) into
//! normalized, deduplicated [`filmloc_core::LocationRecord`]s plus a
//! [`filmloc_core::PageAuditSnapshot`].

pub mod coords;
mod dom;
pub mod error;
pub mod extract;
pub mod markup_fetch;
pub mod normalize;
pub mod page;
pub mod process;
pub mod segment;
pub mod sink;
pub mod strategies;

pub use coords::{parse_coordinates, CoordinateParser};
pub use error::ExtractorError;
pub use extract::{Extractor, PageExtraction};
pub use markup_fetch::{is_markup_source, raw_markup_url, MarkupFetcher, MarkupSource};
pub use normalize::{normalize, NormalizedLocation, NormalizedPage};
pub use page::{derive_title, derive_year, PageContext};
pub use process::{process_page, PageOutcome};
pub use segment::segment;
pub use sink::{
    audit_key, AuditStore, DirectoryAuditStore, JsonLinesSink, MemoryAuditStore, MemorySink,
    RecordSink,
};
pub use strategies::{CandidatePhrase, Strategy};
