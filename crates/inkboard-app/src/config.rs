//! Configuration file loading.
//!
//! Settings come from a TOML file found at an explicit path, the local
//! `inkboard/config.toml`, or the platform config directory, in that order.
//! Without any file the defaults are used.

use inkboard_core::TabId;
use inkboard_render::{DEFAULT_CELL_SIZE, MIN_CELL_SIZE};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "inkboard";
const CONFIG_FILE: &str = "config.toml";

/// Largest canvas width or height accepted.
pub const MAX_CANVAS_DIMENSION: u32 = 16384;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Tab ids in display order. The first one is active at startup.
    pub tabs: Vec<TabId>,
    /// Grid spacing in canvas pixels.
    pub cell_size: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Where drawings are stored. Defaults to the platform data directory.
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tabs: [1, 2, 3].into_iter().filter_map(TabId::new).collect(),
            cell_size: DEFAULT_CELL_SIZE,
            canvas_width: 1280,
            canvas_height: 800,
            storage_dir: None,
        }
    }
}

impl AppConfig {
    /// Check the settings for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tabs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one tab must be configured".into(),
            ));
        }
        let mut seen = BTreeSet::new();
        for tab in &self.tabs {
            if !seen.insert(*tab) {
                return Err(ConfigError::Validation(format!("duplicate tab id {}", tab)));
            }
        }
        if !self.cell_size.is_finite() || self.cell_size < MIN_CELL_SIZE {
            return Err(ConfigError::Validation(format!(
                "cell_size must be at least {}, got {}",
                MIN_CELL_SIZE, self.cell_size
            )));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Validation(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.canvas_width > MAX_CANVAS_DIMENSION || self.canvas_height > MAX_CANVAS_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "canvas size must be at most {max}x{max}, got {}x{}",
                self.canvas_width,
                self.canvas_height,
                max = MAX_CANVAS_DIMENSION
            )));
        }
        Ok(())
    }
}

/// Find and load configuration.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local directory (`inkboard/config.toml`)
/// 3. Platform config directory
/// 4. Defaults
///
/// # Errors
///
/// Returns error if an explicit path does not exist, or a config file
/// cannot be read, parsed or validated.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        log::info!("Loading configuration from {}", path.display());
        return load_config_file(path);
    }

    let local_config = Path::new(CONFIG_DIR).join(CONFIG_FILE);
    if local_config.exists() {
        log::info!("Loading configuration from {}", local_config.display());
        return load_config_file(&local_config);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let system_config = config_dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if system_config.exists() {
            log::info!("Loading configuration from {}", system_config.display());
            return load_config_file(&system_config);
        }
        log::debug!("No configuration at {}", system_config.display());
    } else {
        log::debug!("Could not determine platform config directory");
    }

    log::debug!("No configuration file found, using defaults");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
