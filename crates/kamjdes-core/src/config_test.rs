use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "KAMJDES_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.snapshot_path, PathBuf::from("./data/sample_snapshot.json"));
    assert!(cfg.tables_path.is_none());
    assert!((cfg.default_radius_km - 2.0).abs() < f64::EPSILON);
    assert_eq!(cfg.group_min_count, 3);
    assert_eq!(cfg.geolocation_timeout_secs, 15);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_ENV", "production");
    map.insert("KAMJDES_LOG_LEVEL", "debug");
    map.insert("KAMJDES_SNAPSHOT_PATH", "/srv/kamjdes/snapshot.json");
    map.insert("KAMJDES_TABLES_PATH", "/etc/kamjdes/discovery.yaml");
    map.insert("KAMJDES_DEFAULT_RADIUS_KM", "0.5");
    map.insert("KAMJDES_GROUP_MIN_COUNT", "1");
    map.insert("KAMJDES_GEOLOCATION_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.snapshot_path, PathBuf::from("/srv/kamjdes/snapshot.json"));
    assert_eq!(
        cfg.tables_path,
        Some(PathBuf::from("/etc/kamjdes/discovery.yaml"))
    );
    assert!((cfg.default_radius_km - 0.5).abs() < f64::EPSILON);
    assert_eq!(cfg.group_min_count, 1);
    assert_eq!(cfg.geolocation_timeout_secs, 30);
}

#[test]
fn build_app_config_blank_tables_path_means_builtin() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_TABLES_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.tables_path.is_none());
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KAMJDES_ENV"),
        "expected InvalidEnvVar(KAMJDES_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_radius() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_DEFAULT_RADIUS_KM", "far");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KAMJDES_DEFAULT_RADIUS_KM"),
        "expected InvalidEnvVar(KAMJDES_DEFAULT_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_radius() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_DEFAULT_RADIUS_KM", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "KAMJDES_DEFAULT_RADIUS_KM" && reason.contains("positive")),
        "expected InvalidEnvVar(KAMJDES_DEFAULT_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_group_min_count() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_GROUP_MIN_COUNT", "-3");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KAMJDES_GROUP_MIN_COUNT"),
        "expected InvalidEnvVar(KAMJDES_GROUP_MIN_COUNT), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("KAMJDES_GEOLOCATION_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KAMJDES_GEOLOCATION_TIMEOUT_SECS"),
        "expected InvalidEnvVar(KAMJDES_GEOLOCATION_TIMEOUT_SECS), got: {result:?}"
    );
}
