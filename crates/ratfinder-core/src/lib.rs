//! Domain types and configuration shared by the ratfinder crates.

pub mod app_config;
pub mod config;
pub mod sites;

pub use app_config::{AppConfig, Environment, PresenterConfig};
pub use config::{load_app_config, load_app_config_from_env, load_presenter_config};
pub use sites::{Coordinates, EnrichedSite, SiteRecord, StockStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field} \"{value}\": {reason}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid observation date \"{0}\"")]
    InvalidObservationDate(String),

    #[error("invalid stock status: {0}")]
    InvalidStockStatus(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
