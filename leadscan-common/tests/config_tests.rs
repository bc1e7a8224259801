//! Configuration resolution and logging bootstrap tests
//!
//! Tests that touch LEADSCAN_CONFIG or RUST_LOG are marked #[serial] so they
//! never race each other on the process environment.

use leadscan_common::config::{ExtractionConfig, LoggingConfig, CONFIG_ENV_VAR};
use leadscan_common::logging::init_tracing;
use leadscan_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_explicit_path_wins_over_env() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("explicit.toml");
    let from_env = dir.path().join("env.toml");
    fs::write(&explicit, "[validator]\nacceptance_threshold = 0.65\n").unwrap();
    fs::write(&from_env, "[validator]\nacceptance_threshold = 0.9\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &from_env);
    let config = ExtractionConfig::load(Some(&explicit)).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.validator.acceptance_threshold, 0.65);
}

#[test]
#[serial]
fn test_env_var_path_is_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leadscan.toml");
    fs::write(
        &path,
        "[attribution]\nradius = 400\n\n[channels]\ntimeout_ms = 2500\n",
    )
    .unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let config = ExtractionConfig::load(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.attribution.radius, 400);
    assert_eq!(config.channels.timeout_ms, 2500);
    assert_eq!(config.channels.deadline_ms, 30_000);
}

#[test]
#[serial]
fn test_env_var_pointing_at_missing_file_falls_back() {
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/leadscan/config.toml");
    let config = ExtractionConfig::load(None);
    env::remove_var(CONFIG_ENV_VAR);

    // Falls through to the platform file or defaults, never an error
    assert!(config.is_ok());
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[validator\nacceptance_threshold = ").unwrap();

    let err = ExtractionConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ExtractionConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_round_trip_through_toml() {
    let mut config = ExtractionConfig::default();
    config.validator.accept_single_token = true;
    config.merge.high_quality_threshold = 0.8;

    let text = toml::to_string(&config).unwrap();
    let parsed = ExtractionConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
#[serial]
fn test_init_tracing_is_idempotent() {
    env::remove_var("RUST_LOG");
    let config = LoggingConfig {
        level: "debug".to_string(),
    };
    let first = init_tracing(&config).unwrap();
    let second = init_tracing(&config).unwrap();
    assert!(!second || !first, "only one subscriber can be installed");
}

#[test]
#[serial]
fn test_init_tracing_rejects_bad_level() {
    env::remove_var("RUST_LOG");
    let config = LoggingConfig {
        level: "loud=[".to_string(),
    };
    assert!(matches!(init_tracing(&config), Err(Error::Config(_))));
}
