use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ROOFGUARD_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.api_key.is_none());
    assert_eq!(
        cfg.api_base_url,
        "https://generativelanguage.googleapis.com/"
    );
    assert_eq!(cfg.grounded_model, "gemini-2.5-flash");
    assert_eq!(cfg.text_model, "gemini-3-flash-preview");
    assert_eq!(cfg.request_timeout_secs, 60);
    assert_eq!(cfg.user_agent, "roofguard/0.1 (dispatch-assistant)");
    assert_eq!(
        cfg.store_path,
        std::path::PathBuf::from("./.roofguard/store.json")
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_ENV", "production");
    map.insert("ROOFGUARD_GROUNDED_MODEL", "gemini-2.5-pro");
    map.insert("ROOFGUARD_REQUEST_TIMEOUT_SECS", "15");
    map.insert("ROOFGUARD_STORE_PATH", "/var/lib/roofguard/kv.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.grounded_model, "gemini-2.5-pro");
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(
        cfg.store_path,
        std::path::PathBuf::from("/var/lib/roofguard/kv.json")
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROOFGUARD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ROOFGUARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn resolve_api_key_prefers_primary() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_API_KEY", "primary-key");
    map.insert("API_KEY", "fallback-key");
    assert_eq!(
        resolve_api_key(lookup_from_map(&map)),
        Some("primary-key".to_string())
    );
}

#[test]
fn resolve_api_key_uses_fallback_when_primary_missing() {
    let mut map = HashMap::new();
    map.insert("API_KEY", "fallback-key");
    assert_eq!(
        resolve_api_key(lookup_from_map(&map)),
        Some("fallback-key".to_string())
    );
}

#[test]
fn resolve_api_key_skips_blank_primary() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_API_KEY", "   ");
    map.insert("API_KEY", "fallback-key");
    assert_eq!(
        resolve_api_key(lookup_from_map(&map)),
        Some("fallback-key".to_string())
    );
}

#[test]
fn resolve_api_key_none_when_absent() {
    let map: HashMap<&str, &str> = HashMap::new();
    assert!(resolve_api_key(lookup_from_map(&map)).is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("ROOFGUARD_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
