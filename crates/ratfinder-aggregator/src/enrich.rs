//! Annotating site records relative to a query point.

use chrono::{DateTime, Utc};

use ratfinder_core::{Coordinates, EnrichedSite, SiteRecord};

use crate::distance::great_circle_km;
use crate::error::AggregatorError;
use crate::humanize::{format_distance, time_ago};
use crate::index::SpatialIndex;

/// Annotates one site with its distance from `center` and its freshness as
/// of `now`. The record itself is cloned, never modified.
///
/// # Errors
///
/// Returns [`AggregatorError::MalformedSite`] when the observation date
/// cannot be parsed.
pub fn enrich_site(
    center: Coordinates,
    site: &SiteRecord,
    now: DateTime<Utc>,
) -> Result<EnrichedSite, AggregatorError> {
    let observed_at = site
        .observed_at()
        .map_err(|e| AggregatorError::MalformedSite {
            id: site.id.clone(),
            reason: e.to_string(),
        })?;
    let distance = great_circle_km(center, site.coordinates());

    Ok(EnrichedSite {
        site: site.clone(),
        distance,
        distance_string: format_distance(distance),
        last_updated: time_ago(observed_at, now),
        timestamp: observed_at.timestamp(),
    })
}

/// Sites within `radius_km` of `center`, enriched and nearest first.
///
/// Equal distances keep the order of `sites`.
///
/// # Errors
///
/// Returns [`AggregatorError::MalformedSite`] if any site inside the radius
/// has an unparsable observation date.
pub fn find_nearby(
    center: Coordinates,
    sites: &[SiteRecord],
    radius_km: f64,
    now: DateTime<Utc>,
) -> Result<Vec<EnrichedSite>, AggregatorError> {
    let index = SpatialIndex::build(sites.iter().map(SiteRecord::coordinates));
    let hits = index.within_radius(center, radius_km);

    tracing::debug!(
        indexed = index.len(),
        hits = hits.len(),
        radius_km,
        "radius query complete"
    );

    let mut nearby = hits
        .iter()
        .map(|hit| enrich_site(center, &sites[hit.position], now))
        .collect::<Result<Vec<_>, _>>()?;
    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(nearby)
}
