use std::path::PathBuf;

use crate::app_config::{AppConfig, ExtractionLimits};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to the defaults in
/// [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();
    let default_limits = ExtractionLimits::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_flag = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false/1/0/yes/no, got '{raw}'"))
            }),
            Err(_) => Ok(default),
        }
    };

    let log_level = lookup("FILMLOC_LOG_LEVEL").unwrap_or(defaults.log_level);
    let use_raw_markup = parse_flag("FILMLOC_USE_RAW_MARKUP", defaults.use_raw_markup)?;
    let validate_coordinates =
        parse_flag("FILMLOC_VALIDATE_COORDINATES", defaults.validate_coordinates)?;

    let max_concurrency = parse_usize("FILMLOC_MAX_CONCURRENCY", defaults.max_concurrency)?;
    if max_concurrency == 0 {
        return Err(invalid(
            "FILMLOC_MAX_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    let request_timeout_secs =
        parse_u64("FILMLOC_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let user_agent = lookup("FILMLOC_USER_AGENT").unwrap_or(defaults.user_agent);
    let output_dir = lookup("FILMLOC_OUTPUT_DIR").map_or(defaults.output_dir, PathBuf::from);
    let layouts_path = lookup("FILMLOC_LAYOUTS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let limits = ExtractionLimits {
        max_sibling_steps: parse_usize(
            "FILMLOC_MAX_SIBLING_STEPS",
            default_limits.max_sibling_steps,
        )?,
        max_records_per_page: parse_usize(
            "FILMLOC_MAX_RECORDS_PER_PAGE",
            default_limits.max_records_per_page,
        )?,
        max_audit_locations: parse_usize(
            "FILMLOC_MAX_AUDIT_LOCATIONS",
            default_limits.max_audit_locations,
        )?,
        ..default_limits
    };

    Ok(AppConfig {
        log_level,
        use_raw_markup,
        validate_coordinates,
        max_concurrency,
        request_timeout_secs,
        user_agent,
        output_dir,
        layouts_path,
        limits,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
