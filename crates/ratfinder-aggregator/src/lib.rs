//! Nearby-site aggregation: fetch the upstream catalog, index it spatially,
//! and enrich the sites around a query point.

pub mod aggregator;
pub mod client;
pub mod distance;
pub mod enrich;
pub mod error;
pub mod humanize;
pub mod index;

pub use aggregator::{Aggregator, SEARCH_RADIUS_KM};
pub use client::UpstreamClient;
pub use distance::great_circle_km;
pub use enrich::{enrich_site, find_nearby};
pub use error::{AggregatorError, UpstreamError};
pub use humanize::{format_distance, time_ago};
pub use index::SpatialIndex;
