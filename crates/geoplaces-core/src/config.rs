use crate::app_config::PlacesConfig;
use crate::{ConfigError, DEFAULT_LANGUAGE};

pub(crate) const DEFAULT_BASE_URL: &str = "https://places.geo.us-east-1.amazonaws.com";

/// Load places configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_places_config() -> Result<PlacesConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_places_config_from_env()
}

/// Load places configuration from environment variables already in the process.
///
/// Unlike [`load_places_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_places_config_from_env() -> Result<PlacesConfig, ConfigError> {
    build_places_config(|key| std::env::var(key))
}

/// Build places configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_places_config<F>(lookup: F) -> Result<PlacesConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_key = require("GEOPLACES_API_KEY")?;
    let base_url = or_default("GEOPLACES_BASE_URL", DEFAULT_BASE_URL);
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOPLACES_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{base_url}'"),
        });
    }

    let language = or_default("GEOPLACES_LANGUAGE", DEFAULT_LANGUAGE);
    let log_level = or_default("GEOPLACES_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("GEOPLACES_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOPLACES_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let max_retries = parse_u32("GEOPLACES_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("GEOPLACES_RETRY_BACKOFF_BASE_MS", "500")?;

    Ok(PlacesConfig {
        api_key,
        base_url,
        language,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
