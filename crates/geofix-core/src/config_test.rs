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
fn empty_environment_yields_builtin_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_locate_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg, LocateConfig::default());
    assert_eq!(cfg.defaults.accuracy_threshold, Some(100.0));
    assert_eq!(cfg.defaults.maximum_age_ms, Some(0));
    assert_eq!(cfg.defaults.timeout_ms, Some(8_000));
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("GEOFIX_ACCURACY_THRESHOLD_M", "35.5");
    map.insert("GEOFIX_MAXIMUM_AGE_MS", "60000");
    map.insert("GEOFIX_TIMEOUT_MS", "2500");
    map.insert("GEOFIX_LOCALE", "en");
    map.insert("GEOFIX_LOG_LEVEL", "geofix_locate=debug");
    let cfg = build_locate_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.defaults.accuracy_threshold, Some(35.5));
    assert_eq!(cfg.defaults.maximum_age_ms, Some(60_000));
    assert_eq!(cfg.defaults.timeout_ms, Some(2_500));
    assert_eq!(cfg.defaults.locale, Some(Locale::En));
    assert_eq!(cfg.log_level, "geofix_locate=debug");
}

#[test]
fn threshold_can_be_disabled() {
    for raw in ["none", "OFF", ""] {
        let mut map = HashMap::new();
        map.insert("GEOFIX_ACCURACY_THRESHOLD_M", raw);
        let cfg = build_locate_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.defaults.accuracy_threshold, None, "raw = {raw:?}");
    }
}

#[test]
fn negative_threshold_is_rejected() {
    let mut map = HashMap::new();
    map.insert("GEOFIX_ACCURACY_THRESHOLD_M", "-1");
    let result = build_locate_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEOFIX_ACCURACY_THRESHOLD_M"
        ),
        "expected InvalidEnvVar(GEOFIX_ACCURACY_THRESHOLD_M), got: {result:?}"
    );
}

#[test]
fn non_numeric_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("GEOFIX_TIMEOUT_MS", "soon");
    let result = build_locate_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEOFIX_TIMEOUT_MS"
        ),
        "expected InvalidEnvVar(GEOFIX_TIMEOUT_MS), got: {result:?}"
    );
}

#[test]
fn unknown_locale_is_rejected() {
    let mut map = HashMap::new();
    map.insert("GEOFIX_LOCALE", "klingon");
    let result = build_locate_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEOFIX_LOCALE"),
        "expected InvalidEnvVar(GEOFIX_LOCALE), got: {result:?}"
    );
}

#[test]
fn parse_threshold_rejects_infinity() {
    assert!(parse_threshold("inf").is_err());
    assert_eq!(parse_threshold(" 80 "), Ok(Some(80.0)));
}

#[test]
fn parse_meters_rejects_nan_and_negative() {
    assert!(parse_meters("NaN").is_err());
    assert!(parse_meters("-5").is_err());
    assert!(parse_meters("inf").is_err());
    assert!(parse_meters("metres").is_err());
    assert_eq!(parse_meters("0"), Ok(0.0));
    assert_eq!(parse_meters("42.5"), Ok(42.5));
}
