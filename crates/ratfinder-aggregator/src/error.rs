use thiserror::Error;

/// Failures talking to the upstream site catalog.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid upstream URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error(transparent)]
    InvalidQuery(#[from] ratfinder_core::CoreError),

    #[error("upstream source failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("malformed site record {id}: {reason}")]
    MalformedSite { id: String, reason: String },
}
