//! Application configuration.
//!
//! Settings live in `~/.config/ina-ripper/settings.toml`. Every key is
//! optional; absent keys take the defaults below and unknown keys are
//! ignored. Command-line flags are layered on top with [`Config::apply`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ina_ripper_match::MatchThresholds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Canonical path to the settings file: `~/.config/ina-ripper/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("ina-ripper").join("settings.toml")
}

/// Effective configuration, passed by reference into each stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the record database.
    pub database: PathBuf,
    /// Field delimiter of the database file.
    pub delimiter: char,
    /// Overwrite the database without asking.
    pub skip_confirmation: bool,
    /// Minimum interval between two remote requests.
    #[serde(with = "seconds")]
    pub delay: Duration,
    /// Enrichment leaves records that already have candidates alone.
    pub append: bool,
    /// Candidates kept per record after ranking; 0 keeps all of them.
    pub max_media_candidates: usize,
    /// Collection slugs to operate on; empty means every collection.
    pub collections: BTreeSet<String>,
    pub thresholds: MatchThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("database.tsv"),
            delimiter: '\t',
            skip_confirmation: false,
            delay: Duration::from_millis(1500),
            append: false,
            max_media_candidates: 2,
            collections: BTreeSet::new(),
            thresholds: MatchThresholds::default(),
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub skip_confirmation: bool,
    pub delay: Option<Duration>,
    pub append: bool,
    pub collections: Vec<String>,
}

impl Config {
    /// Load the settings file at [`settings_path`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&settings_path())
    }

    /// Load a settings file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Layer command-line overrides on top of the loaded settings.
    ///
    /// Flags can only switch `skip_confirmation` and `append` on. Collection
    /// names are slugified by the caller.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(delay) = overrides.delay {
            self.delay = delay;
        }
        self.skip_confirmation |= overrides.skip_confirmation;
        self.append |= overrides.append;
        if !overrides.collections.is_empty() {
            self.collections = overrides.collections.into_iter().collect();
        }
        self
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// `Duration` as fractional seconds.
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.database, PathBuf::from("database.tsv"));
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.delay, Duration::from_millis(1500));
        assert_eq!(config.max_media_candidates, 2);
        assert_eq!(config.thresholds.title_error, 0.5);
        assert_eq!(config.thresholds.duration_error, 0.05);
        assert!(config.collections.is_empty());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
database = "/srv/ina/db.tsv"
delay = 0.25
collections = ["radioscopie"]
unknown_key = 3

[thresholds]
title_error = 0.3
"#,
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database, PathBuf::from("/srv/ina/db.tsv"));
        assert_eq!(config.delay, Duration::from_millis(250));
        assert!(config.collections.contains("radioscopie"));
        assert_eq!(config.thresholds.title_error, 0.3);
        assert_eq!(config.thresholds.duration_error, 0.05);
        assert!(!config.append);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "delay = \"soon\"").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
        std::fs::write(&path, "delay = -1.0").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::default().apply(Overrides {
            database: Some(PathBuf::from("other.tsv")),
            skip_confirmation: true,
            delay: Some(Duration::ZERO),
            append: false,
            collections: vec!["radioscopie".into()],
        });
        assert_eq!(config.database, PathBuf::from("other.tsv"));
        assert!(config.skip_confirmation);
        assert_eq!(config.delay, Duration::ZERO);
        assert!(!config.append);
        assert_eq!(config.collections.len(), 1);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.collections.insert("radioscopie".into());
        let text = config.to_toml_string().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
