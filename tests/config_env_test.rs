//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary: it mutates process environment.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use steamloc::application::ApplicationError;
use steamloc::config::Settings;

#[test]
fn given_env_vars_when_load_then_override_config_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("steamloc.toml");
    fs::write(
        &path,
        r#"
dataset = "/from/file.json"
strict_city_id = false
pretty = true
"#,
    )
    .unwrap();
    std::env::set_var("STEAMLOC_DATASET", "/from/env.json");
    std::env::set_var("STEAMLOC_STRICT_CITY_ID", "true");

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.dataset, PathBuf::from("/from/env.json"));
    assert!(settings.strict_city_id);
    assert!(settings.pretty, "unset env var keeps file value");

    // Malformed boolean is reported, not ignored
    std::env::set_var("STEAMLOC_PRETTY", "sometimes");
    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));

    // Cleanup
    std::env::remove_var("STEAMLOC_DATASET");
    std::env::remove_var("STEAMLOC_STRICT_CITY_ID");
    std::env::remove_var("STEAMLOC_PRETTY");
}
