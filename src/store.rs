//! Local preferences: favorites and theme
//!
//! One repository interface with explicit get/set/clear operations, injected
//! where needed instead of reaching for ambient global state. The default
//! implementation persists to a TOML file next to the config
//! (~/.config/watchwave/prefs.toml).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::query::MediaKind;

/// A saved title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub kind: MediaKind,
    pub id: u64,
    pub title: String,
}

/// Repository for user preferences.
pub trait PrefsStore {
    /// All saved favorites, in insertion order.
    fn favorites(&self) -> Result<Vec<Favorite>>;

    /// Save a favorite. Returns `false` if it was already saved.
    fn add_favorite(&self, favorite: Favorite) -> Result<bool>;

    /// Remove a favorite by kind and ID. Returns `false` if it was not saved.
    fn remove_favorite(&self, kind: MediaKind, id: u64) -> Result<bool>;

    /// Remove all favorites.
    fn clear_favorites(&self) -> Result<()>;

    /// Whether dark mode is enabled (defaults to true).
    fn dark_mode(&self) -> Result<bool>;

    fn set_dark_mode(&self, enabled: bool) -> Result<()>;
}

/// Persisted file shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    favorites: Vec<Favorite>,
    #[serde(default = "default_dark_mode")]
    dark_mode: bool,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for PrefsFile {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            dark_mode: true,
        }
    }
}

/// TOML-file-backed preferences store.
pub struct FilePrefsStore {
    path: PathBuf,
}

impl FilePrefsStore {
    /// Store at the default location (~/.config/watchwave/prefs.toml).
    pub fn new() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::at(dir.join("watchwave").join("prefs.toml")))
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> PrefsFile {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn write(&self, prefs: &PrefsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(prefs)?)?;
        Ok(())
    }
}

impl PrefsStore for FilePrefsStore {
    fn favorites(&self) -> Result<Vec<Favorite>> {
        Ok(self.read().favorites)
    }

    fn add_favorite(&self, favorite: Favorite) -> Result<bool> {
        let mut prefs = self.read();
        if prefs
            .favorites
            .iter()
            .any(|f| f.kind == favorite.kind && f.id == favorite.id)
        {
            return Ok(false);
        }
        prefs.favorites.push(favorite);
        self.write(&prefs)?;
        Ok(true)
    }

    fn remove_favorite(&self, kind: MediaKind, id: u64) -> Result<bool> {
        let mut prefs = self.read();
        let before = prefs.favorites.len();
        prefs.favorites.retain(|f| !(f.kind == kind && f.id == id));
        if prefs.favorites.len() == before {
            return Ok(false);
        }
        self.write(&prefs)?;
        Ok(true)
    }

    fn clear_favorites(&self) -> Result<()> {
        let mut prefs = self.read();
        prefs.favorites.clear();
        self.write(&prefs)
    }

    fn dark_mode(&self) -> Result<bool> {
        Ok(self.read().dark_mode)
    }

    fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let mut prefs = self.read();
        prefs.dark_mode = enabled;
        self.write(&prefs)
    }
}
