use chrono::{DateTime, Utc};

use ratfinder_core::{Coordinates, EnrichedSite};

use crate::client::UpstreamClient;
use crate::enrich::find_nearby;
use crate::error::AggregatorError;

/// Radius of every nearby-site query.
pub const SEARCH_RADIUS_KM: f64 = 100.0;

/// Composes the upstream catalog with the radius query.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: UpstreamClient,
}

impl Aggregator {
    #[must_use]
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Sites within [`SEARCH_RADIUS_KM`] of the point given by raw
    /// `lat`/`lng` strings, nearest first.
    ///
    /// Coordinates are validated before the upstream is contacted.
    ///
    /// # Errors
    ///
    /// - [`AggregatorError::InvalidQuery`] for unparsable or out-of-range input.
    /// - [`AggregatorError::Upstream`] when the catalog cannot be fetched.
    /// - [`AggregatorError::MalformedSite`] when a nearby record is malformed.
    pub async fn nearby(&self, lat: &str, lng: &str) -> Result<Vec<EnrichedSite>, AggregatorError> {
        let center = Coordinates::parse(lat, lng)?;
        self.nearby_at(center, Utc::now()).await
    }

    /// Like [`Aggregator::nearby`] with a validated point and explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Aggregator::nearby`].
    pub async fn nearby_at(
        &self,
        center: Coordinates,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedSite>, AggregatorError> {
        let sites = self.client.fetch_sites().await?;
        let nearby = find_nearby(center, &sites, SEARCH_RADIUS_KM, now)?;
        tracing::info!(
            lat = center.lat,
            lng = center.lng,
            catalog = sites.len(),
            nearby = nearby.len(),
            "nearby sites resolved"
        );
        Ok(nearby)
    }
}
