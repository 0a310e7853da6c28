//! HTTP client for the upstream site catalog.

use std::time::Duration;

use reqwest::Client;

use ratfinder_core::SiteRecord;

use crate::error::UpstreamError;

/// HTTP client for the upstream catalog endpoint.
///
/// The catalog is a single JSON array served at the configured base URL.
/// Non-2xx responses and bodies that do not parse are returned as typed
/// errors. Nothing is retried: a failed fetch fails the caller's request.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    catalog_url: String,
}

impl UpstreamClient {
    /// Creates an `UpstreamClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidBaseUrl`] when `base_url` is not an
    /// absolute URL, or [`UpstreamError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, UpstreamError> {
        let catalog_url = Self::catalog_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            catalog_url,
        })
    }

    /// Fetches the full site catalog.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::UnexpectedStatus`] for any non-2xx status.
    /// - [`UpstreamError::Http`] on network or TLS failure.
    /// - [`UpstreamError::Deserialize`] when the body is not a JSON array of
    ///   site records.
    pub async fn fetch_sites(&self) -> Result<Vec<SiteRecord>, UpstreamError> {
        let response = self
            .client
            .get(&self.catalog_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(UpstreamError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.catalog_url.clone(),
            });
        }

        let body = response.text().await?;
        let sites = serde_json::from_str::<Vec<SiteRecord>>(&body).map_err(|e| {
            UpstreamError::Deserialize {
                context: format!("site catalog from {}", self.catalog_url),
                source: e,
            }
        })?;

        tracing::debug!(count = sites.len(), url = %self.catalog_url, "fetched site catalog");
        Ok(sites)
    }

    /// The catalog lives at the root of the base URL, with exactly one
    /// trailing slash.
    fn catalog_url(base_url: &str) -> Result<String, UpstreamError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = reqwest::Url::parse(&format!("{trimmed}/")).map_err(|e| {
            UpstreamError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }
        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
