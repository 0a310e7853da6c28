//! User-adjustable filter and sort criteria, and the pipeline applying them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ratfinder_core::{EnrichedSite, StockStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A control value outside its fixed option set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {kind} \"{value}\"; expected one of: {expected}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

fn unknown_option(kind: &'static str, value: &str, options: &[&str]) -> UnknownOption {
    UnknownOption {
        kind,
        value: value.to_string(),
        expected: options.join(", "),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Nearest first.
    Distance,
    /// Most recently observed first.
    #[default]
    Recency,
}

impl SortField {
    pub const ALL: [SortField; 2] = [Self::Distance, Self::Recency];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Recency => "recency",
        }
    }
}

/// Maximum distance ceiling, one of a fixed set of radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceFilter {
    #[serde(rename = "100km")]
    Km100,
    #[serde(rename = "50km")]
    Km50,
    #[default]
    #[serde(rename = "20km")]
    Km20,
    #[serde(rename = "15km")]
    Km15,
    #[serde(rename = "10km")]
    Km10,
    #[serde(rename = "5km")]
    Km5,
    #[serde(rename = "1km")]
    Km1,
}

impl DistanceFilter {
    /// Offered options, widest first.
    pub const ALL: [DistanceFilter; 7] = [
        Self::Km100,
        Self::Km50,
        Self::Km20,
        Self::Km15,
        Self::Km10,
        Self::Km5,
        Self::Km1,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Km100 => "100km",
            Self::Km50 => "50km",
            Self::Km20 => "20km",
            Self::Km15 => "15km",
            Self::Km10 => "10km",
            Self::Km5 => "5km",
            Self::Km1 => "1km",
        }
    }

    #[must_use]
    pub fn km(self) -> f64 {
        match self {
            Self::Km100 => 100.0,
            Self::Km50 => 50.0,
            Self::Km20 => 20.0,
            Self::Km15 => 15.0,
            Self::Km10 => 10.0,
            Self::Km5 => 5.0,
            Self::Km1 => 1.0,
        }
    }
}

/// Stock status to show, or `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[serde(rename = "IN_STOCK")]
    InStock,
    #[serde(rename = "LOW_STOCK")]
    LowStock,
    #[serde(rename = "NO_STOCK")]
    OutOfStock,
    #[default]
    #[serde(rename = "ALL")]
    All,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [Self::InStock, Self::LowStock, Self::OutOfStock, Self::All];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "IN_STOCK",
            Self::LowStock => "LOW_STOCK",
            Self::OutOfStock => "NO_STOCK",
            Self::All => "ALL",
        }
    }

    #[must_use]
    pub fn matches(self, status: StockStatus) -> bool {
        match self {
            Self::All => true,
            Self::InStock => status == StockStatus::InStock,
            Self::LowStock => status == StockStatus::LowStock,
            Self::OutOfStock => status == StockStatus::OutOfStock,
        }
    }
}

macro_rules! option_set {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|option| option.as_str() == s)
                    .ok_or_else(|| {
                        let options: Vec<&str> = <$ty>::ALL.iter().map(|o| o.as_str()).collect();
                        unknown_option($kind, s, &options)
                    })
            }
        }
    };
}

option_set!(SortField, "sort field");
option_set!(DistanceFilter, "distance filter");
option_set!(StatusFilter, "status filter");

/// The full set of list controls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Case-insensitive substring matched against site names.
    pub text: String,
    pub status: StatusFilter,
    pub max_distance: DistanceFilter,
    pub sort: SortField,
}

/// Applies `state` to `sites`: status, then text, then the distance ceiling,
/// then the sort. Sorting is stable.
#[must_use]
pub fn apply_filters(sites: &[EnrichedSite], state: &FilterState) -> Vec<EnrichedSite> {
    let needle = state.text.to_lowercase();
    let ceiling = state.max_distance.km();

    let mut filtered: Vec<EnrichedSite> = sites
        .iter()
        .filter(|entry| state.status.matches(entry.site.status))
        .filter(|entry| entry.site.name.to_lowercase().contains(&needle))
        .filter(|entry| entry.distance <= ceiling)
        .cloned()
        .collect();

    filtered.sort_by(|a, b| compare(state.sort, a, b));
    filtered
}

fn compare(sort: SortField, a: &EnrichedSite, b: &EnrichedSite) -> Ordering {
    match sort {
        SortField::Distance => a.distance.total_cmp(&b.distance),
        SortField::Recency => b.timestamp.cmp(&a.timestamp),
    }
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
