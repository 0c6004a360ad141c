//! User settings persistence for the canvas.
//!
//! Settings are stored as JSON in the user's config directory
//! (e.g., `~/.config/rubberband/settings.json` on Linux).

use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Canvas preferences persisted between sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Outline figure bounds in addition to their shapes.
    pub show_bounds: bool,
    /// Draw figure labels.
    pub show_labels: bool,
    /// Tint the region invalidated by the last frame.
    pub show_dirty_region: bool,
    /// Darkness of the area outside the rubber band (0-255).
    pub dim_alpha: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_bounds: false,
            show_labels: true,
            show_dirty_region: false,
            dim_alpha: 60,
        }
    }
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rubberband").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Loads settings from `path`; missing or unreadable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
