use std::env::VarError;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Primary credential variable.
pub const API_KEY_VAR: &str = "ROOFGUARD_API_KEY";
/// Consulted only when [`API_KEY_VAR`] is unset or blank.
pub const API_KEY_FALLBACK_VAR: &str = "API_KEY";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Resolve the provider credential: [`API_KEY_VAR`] first, then
/// [`API_KEY_FALLBACK_VAR`]. Blank values count as absent.
pub fn resolve_api_key<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    [API_KEY_VAR, API_KEY_FALLBACK_VAR]
        .into_iter()
        .filter_map(|var| lookup(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    use std::path::PathBuf;

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ROOFGUARD_ENV", "development"))?;
    let log_level = or_default("ROOFGUARD_LOG_LEVEL", "info");
    let api_key = resolve_api_key(&lookup);
    let api_base_url = or_default(
        "ROOFGUARD_API_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );
    let grounded_model = or_default("ROOFGUARD_GROUNDED_MODEL", "gemini-2.5-flash");
    let text_model = or_default("ROOFGUARD_TEXT_MODEL", "gemini-3-flash-preview");

    let request_timeout_secs = parse_u64("ROOFGUARD_REQUEST_TIMEOUT_SECS", "60")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ROOFGUARD_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("ROOFGUARD_USER_AGENT", "roofguard/0.1 (dispatch-assistant)");
    let store_path = PathBuf::from(or_default("ROOFGUARD_STORE_PATH", "./.roofguard/store.json"));

    Ok(AppConfig {
        env,
        log_level,
        api_key,
        api_base_url,
        grounded_model,
        text_model,
        request_timeout_secs,
        user_agent,
        store_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ROOFGUARD_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
