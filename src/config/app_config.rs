use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::split::SplitRatios;

/// Name of the optional settings file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nuscenes_sr.json";

/// Runtime configuration for the demo walkthrough.
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation file to load
    pub annotation_path: PathBuf,
    pub train_ratio: f64,
    pub val_ratio: f64,
    pub test_ratio: f64,
    /// Seed shared by sampling and splitting
    pub random_seed: u64,
    pub sample_size: usize,
    /// Where the demo writes its label-only export
    pub export_path: PathBuf,
    /// Number of training tokens included in the demo export
    pub export_limit: usize,
    pub log: LogConfig,
}

/// Logging destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Also write a timestamped log file under `log_dir`
    pub log_to_file: bool,
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_to_file: true,
            default_filter: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            annotation_path: PathBuf::from("dataset/merged_final_labels_reviewed.json"),
            train_ratio: 0.7,
            val_ratio: 0.15,
            test_ratio: 0.15,
            random_seed: 42,
            sample_size: 5,
            export_path: PathBuf::from("example_train_labels.json"),
            export_limit: 10,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn split_ratios(&self) -> SplitRatios {
        SplitRatios::new(self.train_ratio, self.val_ratio, self.test_ratio)
    }

    /// Load `nuscenes_sr.json` from the current directory, or defaults
    pub fn load() -> Self {
        let (config, source) = Self::resolve();
        source.report();
        config
    }

    /// Load settings from `path`, or return defaults if the file is absent or corrupted
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let (config, source) = Self::resolve_from(path);
        source.report();
        config
    }

    /// Like [`AppConfig::load`], but hands back where the settings came from
    /// instead of logging it, for callers that install logging afterwards.
    pub fn resolve() -> (Self, ConfigSource) {
        match std::env::current_dir() {
            Ok(dir) => Self::resolve_from(dir.join(CONFIG_FILE_NAME)),
            Err(e) => (
                Self::default(),
                ConfigSource::Fallback {
                    path: PathBuf::from(CONFIG_FILE_NAME),
                    reason: format!("could not determine working directory: {}", e),
                },
            ),
        }
    }

    pub fn resolve_from(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref().to_path_buf();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => (config, ConfigSource::File(path)),
                Err(e) => (
                    Self::default(),
                    ConfigSource::Fallback {
                        path,
                        reason: e.to_string(),
                    },
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), ConfigSource::Missing(path))
            }
            Err(e) => (
                Self::default(),
                ConfigSource::Fallback {
                    path,
                    reason: e.to_string(),
                },
            ),
        }
    }
}

/// Where an [`AppConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this settings file
    File(PathBuf),
    /// No settings file, defaults in use
    Missing(PathBuf),
    /// Settings file unreadable or corrupted, defaults in use
    Fallback { path: PathBuf, reason: String },
}

impl ConfigSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigSource::Fallback { .. })
    }

    /// Log the outcome: info for a loaded or absent file, warn for a fallback
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded settings from: {:?}", path),
            ConfigSource::Missing(path) => {
                info!("No settings file at {:?}. Using defaults.", path)
            }
            ConfigSource::Fallback { path, reason } => warn!(
                "Failed to load settings file {:?}: {}. Using defaults.",
                path, reason
            ),
        }
    }
}
