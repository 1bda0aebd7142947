//! Coordinate extraction from free text.
//!
//! Two notations are recognised: a signed decimal pair (`37.7749, -122.4194`)
//! and degrees-minutes-seconds with hemisphere letters
//! (`37°46′29″N 122°25′10″W`). Only the first match of each notation is
//! considered; most phrases carry no coordinates at all.

use std::sync::LazyLock;

use filmloc_core::Coordinates;
use regex::Regex;

static DECIMAL_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])([-+]?\d{1,3}\.\d+)(?:\s*,\s*|\s+)([-+]?\d{1,3}\.\d+)")
        .expect("valid regex")
});

static DMS_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(\d{1,3})\s*°\s*(\d{1,2})\s*[′'’]\s*(?:(\d{1,2}(?:\.\d+)?)\s*(?:[″”\x22]|'')\s*)?([NS])",
        r"[\s,;]*",
        r"(\d{1,3})\s*°\s*(\d{1,2})\s*[′'’]\s*(?:(\d{1,2}(?:\.\d+)?)\s*(?:[″”\x22]|'')\s*)?([EW])",
    ))
    .expect("valid regex")
});

/// Parses coordinates out of text, optionally rejecting implausible values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateParser {
    validate: bool,
}

impl CoordinateParser {
    #[must_use]
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }

    /// Returns the first coordinate pair found in `text`, or `None`.
    ///
    /// With validation enabled, an out-of-range decimal match is discarded
    /// and the degrees-minutes-seconds notation is tried instead.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Coordinates> {
        parse_decimal(text)
            .filter(|c| !self.validate || c.is_plausible())
            .or_else(|| parse_dms(text).filter(|c| !self.validate || c.is_plausible()))
    }
}

/// Parse coordinates without plausibility validation.
#[must_use]
pub fn parse_coordinates(text: &str) -> Option<Coordinates> {
    CoordinateParser::default().parse(text)
}

fn parse_decimal(text: &str) -> Option<Coordinates> {
    let caps = DECIMAL_PAIR_RE.captures(text)?;
    let latitude = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let longitude = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Coordinates::new(latitude, longitude))
}

fn parse_dms(text: &str) -> Option<Coordinates> {
    let caps = DMS_PAIR_RE.captures(text)?;

    let component = |idx: usize| -> Option<f64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<f64>().ok(),
            None => Some(0.0),
        }
    };

    let latitude = dms_to_decimal(component(1)?, component(2)?, component(3)?, &caps[4]);
    let longitude = dms_to_decimal(component(5)?, component(6)?, component(7)?, &caps[8]);
    Some(Coordinates::new(latitude, longitude))
}

fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, hemisphere: &str) -> f64 {
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if matches!(hemisphere, "S" | "W") {
        -value
    } else {
        value
    }
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod tests;
