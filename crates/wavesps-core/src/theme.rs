//! Theme preference
//!
//! The light/dark choice survives restarts in a small `key=value` file.
//! Format:
//! - one `key=value` (or `key:value`) pair per line
//! - `#` and `!` start comment lines
//! - blank lines are ignored

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Preference key for the theme
pub const THEME_KEY: &str = "theme";

/// Dashboard color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    Light,
    /// Dark background
    #[default]
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon of the toggle button (shows what clicking switches to)
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Stored value
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Small persisted key-value store
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// In-memory store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Parse preferences from a string
    pub fn parse(content: &str) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let (key, value) = match trimmed.find(|c: char| c == '=' || c == ':') {
                Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
                None => (trimmed, ""),
            };
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }
        entries
    }

    /// Load a store from a file; a missing file is an empty store
    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let entries = match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Value of a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a key (not saved until [`PreferenceStore::save`])
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Write the store back to its file (no-op for in-memory stores)
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# WaveSPS preferences")?;
        for (key, value) in &self.entries {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Load and persist the theme choice
pub struct ThemePreference;

impl ThemePreference {
    /// Default preferences file in the platform config directory
    pub fn default_path() -> io::Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?;
        Ok(base.join("wavesps").join("preferences.properties"))
    }

    /// Saved theme, if any
    pub fn load(store: &PreferenceStore) -> Option<Theme> {
        store.get(THEME_KEY).and_then(Theme::parse)
    }

    /// Flip the theme and persist the new value
    pub fn toggle(store: &mut PreferenceStore, current: Theme) -> io::Result<Theme> {
        let next = current.toggle();
        store.set(THEME_KEY, next.as_str());
        store.save()?;
        tracing::debug!(theme = %next, "theme preference saved");
        Ok(next)
    }
}
