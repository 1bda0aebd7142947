//! One page through extraction and both sinks.

use filmloc_core::{LocationRecord, MovieMeta};

use crate::extract::Extractor;
use crate::page::PageContext;
use crate::sink::{audit_key, AuditStore, RecordSink};

/// What happened to one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub url: String,
    pub records: Vec<LocationRecord>,
    pub audit_written: bool,
    /// Record sink failure, if any. Audit failures are only logged.
    pub error: Option<String>,
}

/// Extract `ctx`, write its audit snapshot, then append its records.
///
/// An audit write failure is logged and does not stop record emission. A
/// record sink failure is logged and reported in [`PageOutcome::error`].
pub fn process_page(
    extractor: &Extractor,
    ctx: &PageContext<'_>,
    meta: &MovieMeta,
    records: &mut dyn RecordSink,
    audit: &mut dyn AuditStore,
) -> PageOutcome {
    let extraction = extractor.extract_page(ctx, meta);

    let audit_written = match audit.put(&audit_key(ctx.url), &extraction.audit) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(url = ctx.url, error = %e, "failed to write audit snapshot");
            false
        }
    };

    let error = match records.append(&extraction.records) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(url = ctx.url, error = %e, "failed to append location records");
            Some(e.to_string())
        }
    };

    PageOutcome {
        url: ctx.url.to_string(),
        records: extraction.records,
        audit_written,
        error,
    }
}
