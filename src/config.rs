//! Configuration management for Watchwave
//!
//! Handles config file loading/saving and API key resolution.
//! Config is stored at ~/.config/watchwave/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bundled TMDB API key used when neither the environment nor the config
/// file provides one.
const DEFAULT_TMDB_KEY: &str = "b0c0f500a0ad17caed12cc738bf37518";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key override
    pub tmdb_api_key: Option<String>,
    /// Preferred result language (e.g. "en-US")
    pub language: Option<String>,
    /// Default region for watch-provider lookups (e.g. "US")
    pub region: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/watchwave/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("watchwave").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Get TMDB API key with fallback chain:
    /// 1. Environment variable TMDB_API_KEY
    /// 2. Key from config file
    /// 3. Bundled default key
    pub fn tmdb_api_key(&self) -> String {
        if let Ok(key) = std::env::var("TMDB_API_KEY") {
            if !key.is_empty() {
                return key;
            }
        }

        self.tmdb_api_key
            .clone()
            .unwrap_or_else(|| DEFAULT_TMDB_KEY.to_string())
    }
}
