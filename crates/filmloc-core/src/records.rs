//! Output records produced by one page's extraction run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Both halves are always present together; an absent position is modelled
/// as `Option<Coordinates>` rather than two optional floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `true` when latitude is within [-90, 90] and longitude within [-180, 180].
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Caller-supplied hints about the movie a page describes.
///
/// Non-empty hints take precedence over values derived from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMeta {
    pub title: Option<String>,
    pub year: Option<String>,
}

/// One normalized filming location.
///
/// `movie_title` and `year` are best-effort and may be empty, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub movie_title: String,
    pub year: String,
    pub location_text: String,
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub source_url: String,
    pub extracted_at: DateTime<Utc>,
}

/// Per-page diagnostic snapshot kept for manual review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAuditSnapshot {
    pub url: String,
    pub title: String,
    pub extracted_locations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
