use crate::app_config::LocateConfig;
use crate::options::{DEFAULT_ACCURACY_THRESHOLD_M, DEFAULT_MAXIMUM_AGE_MS, DEFAULT_TIMEOUT_MS};
use crate::{ConfigError, Locale, RequestOptions};

/// Load process-wide configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_locate_config() -> Result<LocateConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_locate_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_locate_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_locate_config_from_env() -> Result<LocateConfig, ConfigError> {
    build_locate_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_locate_config<F>(lookup: F) -> Result<LocateConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let accuracy_threshold = parse_threshold(
        &or_default(
            "GEOFIX_ACCURACY_THRESHOLD_M",
            &DEFAULT_ACCURACY_THRESHOLD_M.to_string(),
        ),
    )
    .map_err(|reason| invalid("GEOFIX_ACCURACY_THRESHOLD_M", reason))?;

    let maximum_age_ms = parse_u64("GEOFIX_MAXIMUM_AGE_MS", DEFAULT_MAXIMUM_AGE_MS)?;
    let timeout_ms = parse_u64("GEOFIX_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;

    let locale = or_default("GEOFIX_LOCALE", "zh-CN")
        .parse::<Locale>()
        .map_err(|e| invalid("GEOFIX_LOCALE", e.to_string()))?;

    let log_level = or_default("GEOFIX_LOG_LEVEL", "info");

    Ok(LocateConfig {
        defaults: RequestOptions {
            accuracy_threshold,
            maximum_age_ms: Some(maximum_age_ms),
            timeout_ms: Some(timeout_ms),
            locale: Some(locale),
        },
        log_level,
    })
}

/// Parse a threshold in meters. `none`/`off` (or an empty value) disables it.
fn parse_threshold(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    parse_meters(raw).map(Some)
}

/// Parse a finite, non-negative distance in meters.
///
/// # Errors
///
/// Returns a message naming the rejected value when it is not a number, is
/// negative, or is not finite.
pub fn parse_meters(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    let meters = raw.parse::<f64>().map_err(|e| e.to_string())?;
    if !meters.is_finite() || meters < 0.0 {
        return Err(format!("threshold must be a non-negative number of meters, got {raw}"));
    }
    Ok(meters)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
