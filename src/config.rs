//! Settings management.
//!
//! Loads and saves the optional settings file in TOML format with
//! platform-specific directory resolution. The only setting today is where
//! labware definition files live.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LABWARE_PATH, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory searched for labware definition files
    #[serde(default = "default_labware_definitions")]
    pub labware_definitions: PathBuf,
}

fn default_labware_definitions() -> PathBuf {
    PathBuf::from(DEFAULT_LABWARE_PATH)
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            labware_definitions: default_labware_definitions(),
        }
    }
}

/// Library settings.
///
/// # File Location
///
/// - Linux: `~/.config/labdeck/settings.toml`
/// - macOS: `~/Library/Application Support/labdeck/settings.toml`
/// - Windows: `%APPDATA%\labdeck\settings.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Settings {
    /// Creates settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific settings directory path.
    pub fn settings_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(SETTINGS_DIR_NAME);

        Ok(dir)
    }

    /// Gets the full path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(Self::settings_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Loads settings from the platform settings file.
    ///
    /// If the file doesn't exist, returns default settings.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_file_path()?)
    }

    /// Loads settings from an explicit path, falling back to defaults when the
    /// file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read settings file: {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .context(format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Saves settings to the platform settings file.
    pub fn save(&self) -> Result<()> {
        let dir = Self::settings_dir()?;
        fs::create_dir_all(&dir).context(format!(
            "Failed to create settings directory: {}",
            dir.display()
        ))?;

        self.save_to(&dir.join(SETTINGS_FILE_NAME))
    }

    /// Saves settings to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp settings file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp settings file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates settings values.
    ///
    /// The labware definitions path must be an existing directory.
    pub fn validate(&self) -> Result<()> {
        let dir = &self.paths.labware_definitions;
        if !dir.is_dir() {
            anyhow::bail!(
                "Labware definitions directory does not exist: {}",
                dir.display()
            );
        }

        Ok(())
    }

    /// Sets the labware definitions directory with validation.
    pub fn set_labware_definitions(&mut self, path: PathBuf) -> Result<()> {
        self.paths.labware_definitions = path;
        self.validate()
    }
}
