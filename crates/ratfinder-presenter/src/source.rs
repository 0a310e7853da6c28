//! Client for the aggregator's nearby-sites endpoint.

use std::future::Future;
use std::time::Duration;

use ratfinder_core::{Coordinates, EnrichedSite};
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to deserialize nearby sites from {url}: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the presenter gets its site list from.
pub trait SiteSource {
    fn fetch_nearby(
        &self,
        location: Coordinates,
    ) -> impl Future<Output = Result<Vec<EnrichedSite>, SourceError>> + Send;
}

/// [`SiteSource`] backed by `GET {api_url}/api/rat/{lat}/{lng}`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    api_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("ratfinder-presenter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn nearby_url(&self, location: Coordinates) -> String {
        format!("{}/api/rat/{}/{}", self.api_url, location.lat, location.lng)
    }
}

impl SiteSource for ApiClient {
    async fn fetch_nearby(&self, location: Coordinates) -> Result<Vec<EnrichedSite>, SourceError> {
        let url = self.nearby_url(location);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let sites = serde_json::from_str::<Vec<EnrichedSite>>(&body)
            .map_err(|source| SourceError::Deserialize { url: url.clone(), source })?;
        tracing::debug!(count = sites.len(), %url, "fetched nearby sites");
        Ok(sites)
    }
}
