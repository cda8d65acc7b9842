//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>` if given, else `$XDG_CONFIG_HOME/steamloc/steamloc.toml`
//! 3. Environment variables: `STEAMLOC_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::{expand_env_vars, CityIdParsing};

/// Dataset file name inside the data directory.
pub const DATASET_FILE_NAME: &str = "steam_countries.json";

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub dataset: Option<PathBuf>,
    pub strict_city_id: Option<bool>,
    pub pretty: Option<bool>,
}

/// Unified configuration for steamloc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Steam location dataset (default: `<data dir>/steamloc/steam_countries.json`)
    pub dataset: PathBuf,
    /// Reject non-numeric city ids instead of reading them as 0
    pub strict_city_id: bool,
    /// Emit indented JSON
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: default_dataset_path(),
            strict_city_id: false,
            pretty: false,
        }
    }
}

/// Get the default dataset location.
fn default_dataset_path() -> PathBuf {
    ProjectDirs::from("", "", "steamloc")
        .map(|dirs| dirs.data_dir().join(DATASET_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATASET_FILE_NAME))
}

/// Get the XDG config directory for steamloc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "steamloc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("steamloc.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// City id conversion mode selected by `strict_city_id`.
    pub fn city_id_parsing(&self) -> CityIdParsing {
        if self.strict_city_id {
            CityIdParsing::Strict
        } else {
            CityIdParsing::Lenient
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.dataset.to_string_lossy().as_ref());
        self.dataset = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dataset: overlay
                .dataset
                .clone()
                .unwrap_or_else(|| self.dataset.clone()),
            strict_city_id: overlay.strict_city_id.unwrap_or(self.strict_city_id),
            pretty: overlay.pretty.unwrap_or(self.pretty),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; replaces the global one and must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file: explicit beats global
        match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        debug!("load: global config {}", global_path.display());
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply STEAMLOC_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("STEAMLOC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("dataset"))? {
            settings.dataset = PathBuf::from(val);
        }
        if let Some(val) = optional(config.get_bool("strict_city_id"))? {
            settings.strict_city_id = val;
        }
        if let Some(val) = optional(config.get_bool("pretty"))? {
            settings.pretty = val;
        }

        Ok(settings)
    }
}

/// Unset keys are not an error; malformed values are.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
