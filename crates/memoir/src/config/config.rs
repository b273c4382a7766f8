//! Configuration management for memoir.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{AudioConfig, RecordingConfig, StorageConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
///
/// Every section is optional in the file; a missing section loads as its
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Clip storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Recording behavior settings.
    #[serde(default)]
    pub recording: RecordingConfig,
    /// Audio device configuration.
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent
    /// corruption if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Directory holding clip files: the configured override, or the
    /// application data directory.
    #[track_caller]
    pub fn clips_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.storage.clips_dir {
            return Ok(dir.clone());
        }
        Ok(Self::project_dirs()?.data_dir().join("clips"))
    }

    /// Path of the persisted track counter file.
    #[track_caller]
    pub fn store_path(&self) -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("memory.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "vagabond", "Memoir").ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get project directories".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();

        config.save()?;

        info!("Default config created");

        Ok(config)
    }
}
