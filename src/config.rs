//! Configuration management for cheapcart

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CheapcartError, Result};
use crate::matcher::{Matcher, SimilarityKind};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Matching settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the store catalog files
    pub data_dir: Option<PathBuf>,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
}

/// Matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Similarity strategy for approximate matches
    pub strategy: SimilarityKind,
    /// Minimum similarity for an approximate match
    pub threshold: f64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored output
    pub color: bool,
    /// Maximum number of suggestions
    pub suggestion_limit: usize,
    /// Show every store, not only the recommendation
    pub show_all: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: SimilarityKind::default(),
            threshold: Matcher::DEFAULT_THRESHOLD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            suggestion_limit: 12,
            show_all: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CheapcartError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("cheapcart").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::load_unchecked(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file without range checks
    pub fn load_unchecked(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CheapcartError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reset the configuration file to defaults
    pub fn reset(path: &Path) -> Result<()> {
        Self::default().save_to(path)
    }

    /// Initialize a configuration file
    pub fn init(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(CheapcartError::Config(
                "Configuration file already exists. Use --force to overwrite.".into(),
            ));
        }

        Self::default().save_to(path)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matching.threshold) {
            return Err(CheapcartError::InvalidThreshold(self.matching.threshold));
        }
        if self.general.jobs == Some(0) {
            return Err(CheapcartError::Config("jobs must be at least 1".into()));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "general.data_dir" => self.general.data_dir.as_ref().map(|p| p.display().to_string()),
            "general.jobs" => self.general.jobs.map(|j| j.to_string()),

            "matching.strategy" => Some(self.matching.strategy.to_string()),
            "matching.threshold" => Some(self.matching.threshold.to_string()),

            "output.color" => Some(self.output.color.to_string()),
            "output.suggestion_limit" => Some(self.output.suggestion_limit.to_string()),
            "output.show_all" => Some(self.output.show_all.to_string()),

            "logging.level" => Some(self.logging.level.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "general.data_dir" => {
                self.general.data_dir = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            "general.jobs" => {
                self.general.jobs = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        CheapcartError::Config("Invalid number for jobs".into())
                    })?)
                };
            }

            "matching.strategy" => {
                self.matching.strategy = value.parse()?;
            }
            "matching.threshold" => {
                let threshold: f64 = value.parse().map_err(|_| {
                    CheapcartError::Config("Invalid number for threshold".into())
                })?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(CheapcartError::InvalidThreshold(threshold));
                }
                self.matching.threshold = threshold;
            }

            "output.color" => {
                self.output.color = value.parse().map_err(|_| {
                    CheapcartError::Config("Invalid boolean for color".into())
                })?;
            }
            "output.suggestion_limit" => {
                self.output.suggestion_limit = value.parse().map_err(|_| {
                    CheapcartError::Config("Invalid number for suggestion_limit".into())
                })?;
            }
            "output.show_all" => {
                self.output.show_all = value.parse().map_err(|_| {
                    CheapcartError::Config("Invalid boolean for show_all".into())
                })?;
            }

            "logging.level" => {
                self.logging.level = value.to_string();
            }

            _ => {
                return Err(CheapcartError::Config(format!("Unknown configuration key: {}", key)));
            }
        }

        self.validate()
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.general
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Build the matcher described by the matching section
    pub fn matcher(&self) -> Result<Matcher> {
        Matcher::from_kind(self.matching.strategy, self.matching.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.matching.strategy, SimilarityKind::SequenceRatio);
        assert_eq!(config.matching.threshold, 0.6);
        assert_eq!(config.output.suggestion_limit, 12);
        assert_eq!(config.data_dir(), PathBuf::from("data"));
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        config.set("matching.strategy", "jaro-winkler").unwrap();
        assert_eq!(config.get("matching.strategy"), Some("jaro-winkler".to_string()));

        config.set("matching.threshold", "0.75").unwrap();
        assert_eq!(config.get("matching.threshold"), Some("0.75".to_string()));

        config.set("general.data_dir", "/srv/poed").unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/srv/poed"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("matching.threshold", "1.5").is_err());
        assert!(config.set("matching.strategy", "soundex").is_err());
        assert!(config.set("general.jobs", "0").is_err());
        assert!(config.set("no.such.key", "1").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("matching.strategy", "levenshtein").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matching.strategy, SimilarityKind::Levenshtein);
        assert!(Config::init(&path, false).is_err());
        Config::init(&path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().matching.strategy, SimilarityKind::SequenceRatio);
    }

    #[test]
    fn test_unchecked_load_accepts_out_of_range_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nthreshold = 2.0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CheapcartError::InvalidThreshold(_))));
        let mut config = Config::load_unchecked(&path).unwrap();
        assert_eq!(config.matching.threshold, 2.0);
        config.set("matching.threshold", "0.6").unwrap();
        assert_eq!(config.matching.threshold, 0.6);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nthreshold = 0.7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.matching.threshold, 0.7);
        assert_eq!(config.matching.strategy, SimilarityKind::SequenceRatio);
        assert!(config.output.color);
    }
}
