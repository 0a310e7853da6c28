//! Site records as served by the upstream source, and their enriched form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Stock level reported for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    /// Serialized as `NO_STOCK`, matching the upstream vocabulary.
    #[serde(rename = "NO_STOCK")]
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];

    /// Wire name, e.g. `"IN_STOCK"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "IN_STOCK",
            Self::LowStock => "LOW_STOCK",
            Self::OutOfStock => "NO_STOCK",
        }
    }

    /// Human-facing label shown on a result card.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidStockStatus(s.to_string()))
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Validates a point, rejecting non-finite and out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] naming the offending field.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        check_range("latitude", lat, 90.0)?;
        check_range("longitude", lng, 180.0)?;
        Ok(Self { lat, lng })
    }

    /// Parses a point from raw string inputs such as URL path segments.
    ///
    /// Anything that does not parse as a finite float inside the valid range
    /// is an error; `"NaN"` and `"inf"` are rejected even though `f64`
    /// accepts them.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] naming the offending field.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, CoreError> {
        let lat = parse_degrees("latitude", lat)?;
        let lng = parse_degrees("longitude", lng)?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, CoreError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| CoreError::InvalidCoordinate {
            field,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

fn check_range(field: &'static str, value: f64, bound: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidCoordinate {
            field,
            value: value.to_string(),
            reason: "not a finite number".to_string(),
        });
    }
    if value.abs() > bound {
        return Err(CoreError::InvalidCoordinate {
            field,
            value: value.to_string(),
            reason: format!("outside [-{bound}, {bound}]"),
        });
    }
    Ok(())
}

/// A site as served by the upstream source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Observation time, usually without a zone suffix (read as UTC).
    pub date: String,
    /// Price in minor currency units.
    #[serde(default)]
    pub price_in_cents: Option<i64>,
    /// Number of units covered by `price_in_cents`.
    #[serde(default)]
    pub price_per_n: Option<u32>,
    pub status: StockStatus,
}

impl SiteRecord {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// Parses [`SiteRecord::date`] into a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidObservationDate`] when none of the accepted
    /// layouts match.
    pub fn observed_at(&self) -> Result<DateTime<Utc>, CoreError> {
        parse_observation_date(&self.date)
    }
}

const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an observation timestamp. Values without a zone are UTC.
///
/// # Errors
///
/// Returns [`CoreError::InvalidObservationDate`] when no layout matches.
pub fn parse_observation_date(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CoreError::InvalidObservationDate(raw.to_string()))
}

/// A [`SiteRecord`] annotated relative to a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSite {
    #[serde(flatten)]
    pub site: SiteRecord,
    /// Great-circle distance from the query point, in kilometres.
    pub distance: f64,
    /// `distance` rounded for display, e.g. `"12.34 km"`.
    pub distance_string: String,
    /// Elapsed time since observation, e.g. `"about 2 hours ago"`.
    pub last_updated: String,
    /// Observation time as Unix seconds.
    pub timestamp: i64,
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
