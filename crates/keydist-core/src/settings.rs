// Keydist Settings Module
// Loads default costs and the keyboard layout choice from TOML

#![cfg(feature = "config")]

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{CostConfig, Layout, LayoutError};

/// User settings for distance computations
///
/// Loaded from a TOML file (default: ~/.config/keydist/settings.toml):
///
/// ```toml
/// [costs]
/// insertionCost = 1
/// deletionCost = 1
/// substitutionCost = 2
/// useKeyboardModel = true
///
/// [keyboard]
/// layout = "dvorak.toml"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Cost weights and the keyboard bias toggle
    costs: CostConfig,

    /// Custom layout file; `None` means the built-in QWERTY layout
    layout_path: Option<PathBuf>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    costs: Option<CostConfig>,

    #[serde(default)]
    keyboard: Option<KeyboardSettings>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct KeyboardSettings {
    #[serde(default)]
    layout: Option<PathBuf>,
}

impl Settings {
    /// Create settings with default costs and the built-in layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    ///
    /// A relative layout path is resolved against the settings file's
    /// directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;

        if let (Some(layout), Some(dir)) = (settings.layout_path.as_ref(), path.parent()) {
            if layout.is_relative() {
                settings.layout_path = Some(dir.join(layout));
            }
        }
        settings.source_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Load settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(costs) = toml_settings.costs {
            settings.costs = costs;
        }

        if let Some(keyboard) = toml_settings.keyboard {
            settings.layout_path = keyboard.layout;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keydist").join("settings.toml"))
    }

    /// Load from default location (~/.config/keydist/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    pub fn costs(&self) -> &CostConfig {
        &self.costs
    }

    pub fn costs_mut(&mut self) -> &mut CostConfig {
        &mut self.costs
    }

    pub fn layout_path(&self) -> Option<&Path> {
        self.layout_path.as_deref()
    }

    pub fn set_layout_path(&mut self, path: Option<PathBuf>) {
        self.layout_path = path;
    }

    /// Load the configured layout, or `None` for the built-in one
    pub fn load_layout(&self) -> Result<Option<Layout>, SettingsError> {
        match self.layout_path {
            Some(ref path) => Ok(Some(Layout::from_file(path)?)),
            None => Ok(None),
        }
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keydist Settings
# Place this file at: ~/.config/keydist/settings.toml

[costs]
insertionCost = 1
deletionCost = 1
substitutionCost = 2
# Discount typos between adjacent keys
useKeyboardModel = false

[keyboard]
# Optional layout file; the built-in QWERTY layout is used if not set
# layout = "layout.toml"
"#
}
