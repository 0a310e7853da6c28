use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment, PresenterConfig};
use crate::sites::Coordinates;
use crate::ConfigError;

/// Load aggregator configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load aggregator configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load presenter configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_presenter_config() -> Result<PresenterConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_presenter_config(|key| std::env::var(key))
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn parse_or_default<T, F>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, VarError>,
{
    or_default(lookup, var, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Core parsing/validation for the aggregator settings, decoupled from the
/// process environment so tests can use a plain `HashMap` lookup.
pub(crate) fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let upstream_base_url = lookup("RAT_API_BASE")
        .map_err(|_| ConfigError::MissingEnvVar("RAT_API_BASE".to_string()))?;
    if upstream_base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "RAT_API_BASE".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let env = parse_environment(&or_default(&lookup, "RATFINDER_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_or_default(&lookup, "RATFINDER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default(&lookup, "RATFINDER_LOG_LEVEL", "info");
    let upstream_timeout_secs: u64 =
        parse_or_default(&lookup, "RATFINDER_UPSTREAM_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        &lookup,
        "RATFINDER_USER_AGENT",
        "ratfinder/0.1 (site-locator)",
    );
    let rate_limit_per_minute: usize =
        parse_or_default(&lookup, "RATFINDER_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        upstream_timeout_secs,
        user_agent,
        rate_limit_per_minute,
    })
}

pub(crate) fn build_presenter_config<F>(lookup: F) -> Result<PresenterConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let api_url = or_default(&lookup, "RATFINDER_API_URL", "http://127.0.0.1:3000");
    let api_timeout_secs: u64 = parse_or_default(&lookup, "RATFINDER_API_TIMEOUT_SECS", "30")?;
    let prefs_path = PathBuf::from(or_default(
        &lookup,
        "RATFINDER_PREFS_PATH",
        "./.ratfinder/preferences.json",
    ));
    let location = lookup("RATFINDER_LOCATION")
        .ok()
        .map(|raw| parse_location(&raw))
        .transpose()?;
    let log_level = or_default(&lookup, "RATFINDER_LOG_LEVEL", "warn");

    Ok(PresenterConfig {
        api_url,
        api_timeout_secs,
        prefs_path,
        location,
        log_level,
    })
}

/// Parse a `"lat,lng"` pair.
fn parse_location(raw: &str) -> Result<Coordinates, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "RATFINDER_LOCATION".to_string(),
        reason,
    };
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| invalid("expected \"lat,lng\"".to_string()))?;
    Coordinates::parse(lat, lng).map_err(|e| invalid(e.to_string()))
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RATFINDER_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
