//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. A missing file is not an
//! error: defaults are used and a warning is logged.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "ROSTER_ROOT_FOLDER";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Database file name, relative to the root folder
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Groups inserted when the groups table is empty
    #[serde(default = "default_seed_groups")]
    pub seed_groups: Vec<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_file: default_database_file(),
            host: default_host(),
            port: default_port(),
            seed_groups: default_seed_groups(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_database_file() -> String {
    "roster.db".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5780
}

fn default_seed_groups() -> Vec<String> {
    vec!["Group A".to_string(), "Group B".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from an explicit path, or from the platform
    /// default location when `path` is `None`
    ///
    /// An explicit path that does not exist is an error. A missing default
    /// file falls back to built-in defaults. Nothing is logged here; callers
    /// report the returned [`ConfigSource`] once tracing is initialized.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!("Config file not found: {}", p.display())));
                }
                p.to_path_buf()
            }
            None => match default_config_file() {
                Some(p) => p,
                None => return Ok((Self::default(), ConfigSource::Defaults)),
            },
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config = Self::from_toml_str(&content)?;
        Ok((config, ConfigSource::File(config_path)))
    }
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No config file found; built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Report the source; a missing file is a warning
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Defaults => warn!("No config file found, using built-in defaults"),
        }
    }
}

/// Locate the default configuration file for the platform
///
/// Tries `<config_dir>/roster/config.toml`, then `/etc/roster/config.toml`
/// on Linux.
fn default_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("roster").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/roster/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Root folder resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("roster"))
        .unwrap_or_else(|| PathBuf::from("./roster_data"))
}

/// Full database path for a resolved root folder
pub fn database_path(root_folder: &Path, config: &TomlConfig) -> PathBuf {
    root_folder.join(&config.database_file)
}
