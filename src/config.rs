//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprtree/exprtree.toml`
//! 3. Explicit config file passed by the caller
//! 4. Environment variables: `EXPRTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("environment overrides: {0}")]
    Environment(#[from] config::ConfigError),
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `"warn"` or `"exprtree=debug"`. `RUST_LOG` wins if set.
    pub filter: String,
    /// Emit span enter/close events
    pub span_events: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".into(),
            span_events: false,
        }
    }
}

/// Raw log settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLogSettings {
    pub filter: Option<String>,
    pub span_events: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub log: RawLogSettings,
}

/// Unified configuration for exprtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub log: LogSettings,
}

/// Get the XDG config directory for exprtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            log: LogSettings {
                filter: overlay
                    .log
                    .filter
                    .clone()
                    .unwrap_or_else(|| self.log.filter.clone()),
                span_events: overlay.log.span_events.unwrap_or(self.log.span_events),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, only if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit file
        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply `EXPRTREE_*` environment variables, e.g. `EXPRTREE_LOG__FILTER=debug`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("EXPRTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        if let Ok(val) = config.get_string("log.filter") {
            settings.log.filter = val;
        }
        if let Ok(val) = config.get_bool("log.span_events") {
            settings.log.span_events = val;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_values_when_merging_then_keeps_base() {
        let base = Settings::default();
        let merged = base.merge_with(&RawSettings::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn given_overlay_filter_when_merging_then_overlay_wins() {
        let overlay: RawSettings = toml::from_str("[log]\nfilter = \"exprtree=trace\"\n").unwrap();
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.log.filter, "exprtree=trace");
        assert!(!merged.log.span_events);
    }

    #[test]
    fn given_global_config_path_when_resolving_then_ends_with_file_name() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with("exprtree.toml"));
        }
    }
}
