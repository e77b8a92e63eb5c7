//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetris-classic/settings.toml (or platform
//! equivalent). Only presentation preferences live here; board size and
//! speed are fixed by the game rules.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub restart: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
    /// Show the next piece beside the board
    pub show_next: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            rotate: vec!["Up".to_string()],
            restart: vec!["r".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
            show_next: true,
        }
    }
}

impl VisualSettings {
    /// Get the block characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", " ."),
            "round" => ("()", " ."),
            _ => ("██", "  "), // "solid" or default
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetris-classic", "tetris-classic")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the platform config file, or defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file. Missing files give defaults; a file that
    /// does not parse is logged and replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!("No settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    /// Write settings to `path` unless a file is already there, so an
    /// edited file is never overwritten. Returns whether a file was written.
    pub fn save_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        tracing::info!("Wrote default settings to {}", path.display());
        Ok(true)
    }
}
