/// Application configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use soundpad_importer::scanner::{DEFAULT_EXCLUDE_NAMES, DEFAULT_MAX_RESULTS, FULL_SCAN_EXTENSIONS};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "soundpad.toml";

/// Environment prefix, e.g. `SOUNDPAD_SCAN__MAX_RESULTS=1000`
pub const ENV_PREFIX: &str = "SOUNDPAD";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub scan: ScanSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanSettings {
    /// Soft cap for a full scan
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Directory names never descended into
    #[serde(default = "default_exclude_names")]
    pub exclude_names: Vec<String>,

    /// Extensions collected by a full scan
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Fixed scan roots; empty means every mounted volume
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `soundpad.toml` lookup. A missing default
    /// file is fine; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                settings = settings
                    .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false));
            }
        }

        let config: Self = settings.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.max_results == 0 {
            return Err(AppError::Config(
                "scan.max_results must be greater than zero".to_string(),
            ));
        }

        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(AppError::Config(
                "scan.extensions must name at least one extension".to_string(),
            ));
        }

        if self.playback.history_size == 0 {
            return Err(AppError::Config(
                "playback.history_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Override with environment variables (SOUNDPAD_SECTION__KEY)
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("scan.exclude_names")
        .with_list_parse_key("scan.extensions")
        .with_list_parse_key("scan.roots")
}

// Default values
fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soundpad")
        .join("soundpad.db")
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_exclude_names() -> Vec<String> {
    DEFAULT_EXCLUDE_NAMES.iter().map(ToString::to_string).collect()
}

fn default_extensions() -> Vec<String> {
    FULL_SCAN_EXTENSIONS.iter().map(ToString::to_string).collect()
}

fn default_history_size() -> usize {
    50
}

fn default_log_filter() -> String {
    "soundpad=info".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            exclude_names: default_exclude_names(),
            extensions: default_extensions(),
            roots: Vec::new(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
