//! One-shot position acquisition.

use std::future::Future;

use ratfinder_core::Coordinates;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location permission denied")]
    Denied,
}

/// A source of the user's current position, asked at most once per mount.
pub trait LocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// A position known up front (command-line flags, configuration), or the
/// absence of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLocation {
    position: Option<Coordinates>,
}

impl StaticLocation {
    #[must_use]
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl LocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or_else(|| {
            LocationError::Unavailable(
                "no position configured; pass --lat/--lng or set RATFINDER_LOCATION".to_string(),
            )
        })
    }
}
