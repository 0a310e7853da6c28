use std::net::SocketAddr;
use std::path::PathBuf;

use crate::sites::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Settings for the aggregator service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the upstream site catalog.
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_per_minute: usize,
}

/// Settings for the terminal presenter.
#[derive(Debug, Clone)]
pub struct PresenterConfig {
    /// Base URL of the aggregator service.
    pub api_url: String,
    pub api_timeout_secs: u64,
    pub prefs_path: PathBuf,
    /// Fallback location used when none is given on the command line.
    pub location: Option<Coordinates>,
    pub log_level: String,
}
