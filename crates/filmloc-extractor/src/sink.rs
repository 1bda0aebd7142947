//! Output collaborators: an append-only record sink and a key/value audit
//! store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use filmloc_core::{LocationRecord, PageAuditSnapshot};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ExtractorError;

/// Everything except `A-Za-z0-9-_.~` is escaped.
const AUDIT_KEY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Records file name under the output directory.
pub const RECORDS_FILE: &str = "records.jsonl";
/// Audit directory name under the output directory.
pub const AUDIT_DIR: &str = "audit";

/// Percent-encoded page URL used as the audit key.
#[must_use]
pub fn audit_key(url: &str) -> String {
    utf8_percent_encode(url, AUDIT_KEY_SET).to_string()
}

/// Append-only destination for location records.
pub trait RecordSink {
    /// # Errors
    ///
    /// Returns an error when the records cannot be persisted.
    fn append(&mut self, records: &[LocationRecord]) -> Result<(), ExtractorError>;
}

/// Key/value destination for audit snapshots; `put` overwrites.
pub trait AuditStore {
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be persisted.
    fn put(&mut self, key: &str, snapshot: &PageAuditSnapshot) -> Result<(), ExtractorError>;
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Open (or create) `<output_dir>/records.jsonl` for appending.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::SinkIo`] if the directory or file cannot be
    /// created.
    pub fn open(output_dir: &Path) -> Result<Self, ExtractorError> {
        fs::create_dir_all(output_dir).map_err(|source| sink_io(output_dir, source))?;
        let path = output_dir.join(RECORDS_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| sink_io(&path, source))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonLinesSink {
    fn append(&mut self, records: &[LocationRecord]) -> Result<(), ExtractorError> {
        for record in records {
            serde_json::to_writer(&mut self.writer, record)?;
            self.writer
                .write_all(b"\n")
                .map_err(|source| sink_io(&self.path, source))?;
        }
        self.writer
            .flush()
            .map_err(|source| sink_io(&self.path, source))
    }
}

/// Stores each snapshot as `<output_dir>/audit/<key>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryAuditStore {
    dir: PathBuf,
}

impl DirectoryAuditStore {
    /// # Errors
    ///
    /// Returns [`ExtractorError::SinkIo`] if the audit directory cannot be
    /// created.
    pub fn open(output_dir: &Path) -> Result<Self, ExtractorError> {
        let dir = output_dir.join(AUDIT_DIR);
        fs::create_dir_all(&dir).map_err(|source| sink_io(&dir, source))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl AuditStore for DirectoryAuditStore {
    fn put(&mut self, key: &str, snapshot: &PageAuditSnapshot) -> Result<(), ExtractorError> {
        let path = self.path_for(key);
        let body = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&path, body).map_err(|source| sink_io(&path, source))
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<LocationRecord>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, records: &[LocationRecord]) -> Result<(), ExtractorError> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}

/// Keeps snapshots in memory, in insertion order; `put` replaces by key.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    pub entries: Vec<(String, PageAuditSnapshot)>,
}

impl MemoryAuditStore {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PageAuditSnapshot> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, snapshot)| snapshot)
    }
}

impl AuditStore for MemoryAuditStore {
    fn put(&mut self, key: &str, snapshot: &PageAuditSnapshot) -> Result<(), ExtractorError> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = snapshot.clone(),
            None => self.entries.push((key.to_string(), snapshot.clone())),
        }
        Ok(())
    }
}

fn sink_io(path: &Path, source: std::io::Error) -> ExtractorError {
    ExtractorError::SinkIo {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn snapshot(url: &str, locations: &[&str]) -> PageAuditSnapshot {
        PageAuditSnapshot {
            url: url.to_string(),
            title: "Vertigo".to_string(),
            extracted_locations: locations.iter().map(|s| (*s).to_string()).collect(),
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).expect("valid epoch"),
        }
    }

    fn record(text: &str) -> LocationRecord {
        LocationRecord {
            movie_title: "Vertigo".to_string(),
            year: "1958".to_string(),
            location_text: text.to_string(),
            city: text.to_string(),
            region: None,
            country: None,
            coordinates: None,
            source_url: "https://example.org/vertigo".to_string(),
            extracted_at: DateTime::<Utc>::from_timestamp(0, 0).expect("valid epoch"),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("filmloc-sink-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn audit_key_escapes_everything_but_unreserved() {
        assert_eq!(
            audit_key("https://en.wikipedia.org/wiki/Vertigo_(film)"),
            "https%3A%2F%2Fen.wikipedia.org%2Fwiki%2FVertigo_%28film%29"
        );
        assert_eq!(audit_key("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(audit_key("é"), "%C3%A9");
    }

    #[test]
    fn memory_audit_store_overwrites_by_key() {
        let mut store = MemoryAuditStore::default();
        store.put("k", &snapshot("u", &["Rome"])).unwrap();
        store.put("k", &snapshot("u", &["Oslo"])).unwrap();
        assert_eq!(store.entries.len(), 1);
        assert_eq!(store.get("k").unwrap().extracted_locations, vec!["Oslo"]);
    }

    #[test]
    fn json_lines_sink_appends_one_object_per_line() {
        let dir = temp_dir("jsonl");
        {
            let mut sink = JsonLinesSink::open(&dir).unwrap();
            sink.append(&[record("Rome"), record("Oslo")]).unwrap();
        }
        {
            let mut sink = JsonLinesSink::open(&dir).unwrap();
            sink.append(&[record("Venice")]).unwrap();
        }

        let body = fs::read_to_string(dir.join(RECORDS_FILE)).unwrap();
        let lines: Vec<serde_json::Value> = body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["locationText"], "Rome");
        assert_eq!(lines[2]["locationText"], "Venice");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn directory_audit_store_overwrites_file() {
        let dir = temp_dir("audit");
        let mut store = DirectoryAuditStore::open(&dir).unwrap();
        let key = audit_key("https://example.org/vertigo");

        store.put(&key, &snapshot("https://example.org/vertigo", &["Rome"])).unwrap();
        store.put(&key, &snapshot("https://example.org/vertigo", &[])).unwrap();

        let body = fs::read_to_string(store.path_for(&key)).unwrap();
        let saved: PageAuditSnapshot = serde_json::from_str(&body).unwrap();
        assert!(saved.extracted_locations.is_empty());
        assert!(store
            .path_for(&key)
            .starts_with(dir.join(AUDIT_DIR)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
