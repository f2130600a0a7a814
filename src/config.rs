// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Persisted as JSON under the user config directory. A missing or
//! unreadable file falls back to defaults; only explicit saves write.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::errors::AppResult;
use crate::tracking::ClippingPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Clipping-distance derivation (margin behind the tracked point,
    /// fallback when nothing is tracked)
    pub clipping: ClippingPolicy,
    /// Frame width for the synthetic demo source
    pub demo_width: u32,
    /// Frame height for the synthetic demo source
    pub demo_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clipping: ClippingPolicy::default(),
            demo_width: DEFAULT_WIDTH,
            demo_height: DEFAULT_HEIGHT,
        }
    }
}

impl Config {
    /// Path of the config file, if a config directory exists on this system
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depthclip").join("config.json"))
    }

    /// Load the user config, falling back to defaults on any problem
    pub fn load() -> Self {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!(error = %e, path = %path.display(), "Failed to load config, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save to the user config path
    pub fn save(&self) -> AppResult<()> {
        let path = Self::path().ok_or("No config directory available")?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
