use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid selector \"{selector}\" in layout '{layout}': {reason}")]
    InvalidSelector {
        layout: String,
        selector: String,
        reason: String,
    },

    #[error("invalid path pattern in layout '{layout}': {source}")]
    InvalidPathPattern {
        layout: String,
        #[source]
        source: regex::Error,
    },

    #[error("sink I/O error at {path}: {source}")]
    SinkIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
