//! Settings persistence.
//!
//! Loads and saves the editor configuration as JSON. Bridges the hosting
//! application's settings UI with [`EditorConfig`]; loading always validates
//! before handing the config out.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::error::{Result, SettingsError};

/// Settings persistence layer.
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: EditorConfig,
}

impl SettingsPersistence {
    /// Create a new persistence layer with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a JSON file, validating the result.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {e}", path.display())))?;
        let config: EditorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded editor settings");
        Ok(Self { config })
    }

    /// Load settings from the default location, falling back to defaults.
    ///
    /// A missing or unreadable file is not an error for startup; the reason
    /// is logged and the defaults are used.
    pub fn load_or_default() -> Self {
        match Self::default_config_path().and_then(|p| Self::load_from_file(&p)) {
            Ok(persistence) => persistence,
            Err(e) => {
                warn!("using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.config.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SettingsError::SaveError(format!("{}: {e}", parent.display())))?;
        }
        let data = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, data)
            .map_err(|e| SettingsError::SaveError(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "saved editor settings");
        Ok(())
    }

    /// The per-user settings file location.
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| SettingsError::ConfigDirectory("no user config directory".into()))?;
        Ok(base.join("mapmark").join("settings.json"))
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get a mutable reference to the config.
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    /// Validate the current config.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()
    }
}
