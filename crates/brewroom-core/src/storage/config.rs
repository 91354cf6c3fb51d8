//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default session length and quick-pick presets
//! - Music preview window, selected track and asset directory
//! - An optional fixed seed for sticker draws
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, SessionError};
use crate::playback::DEFAULT_PREVIEW_WINDOW_SECS;
use crate::timer::{SessionConfig, PRESET_MINUTES};

/// Session length defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_minutes")]
    pub minutes: u64,
    #[serde(default)]
    pub seconds: u64,
    #[serde(default = "default_presets")]
    pub presets: Vec<u64>,
}

/// Music playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_preview_window")]
    pub preview_window_secs: u64,
    /// Track played in loop mode during a session. Silence when unset.
    #[serde(default)]
    pub selected_track: Option<u32>,
    /// Directory holding `<filename>.mp3` assets. Defaults to `<data_dir>/music`.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

/// Sticker collection configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Fixed RNG seed for reproducible draws. Entropy-seeded when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionDefaults,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

// Default functions
fn default_minutes() -> u64 {
    25
}
fn default_presets() -> Vec<u64> {
    PRESET_MINUTES.to_vec()
}
fn default_preview_window() -> u64 {
    DEFAULT_PREVIEW_WINDOW_SECS
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            minutes: default_minutes(),
            seconds: 0,
            presets: default_presets(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            preview_window_secs: default_preview_window(),
            selected_track: None,
            assets_dir: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional fields are stored as null; accept "none" to clear,
                    // a number for numeric options, anything else as a string.
                    serde_json::Value::Null | serde_json::Value::String(_)
                        if value.eq_ignore_ascii_case("none") =>
                    {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Null => match value.parse::<u64>() {
                        Ok(n) => serde_json::Value::Number(n.into()),
                        Err(_) => serde_json::Value::String(value.into()),
                    },
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::LoadFailed {
                path: PathBuf::from("config.toml"),
                message: e.to_string(),
            })
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Typed value at a dot-separated key.
    ///
    /// # Errors
    /// `ConfigError::UnknownKey` if no field lives at `key`.
    pub fn value(&self, key: &str) -> Result<serde_json::Value, ConfigError> {
        let json =
            serde_json::to_value(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::get_json_value_by_path(&json, key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// Set a config value by key without saving. Returns error if key is unknown.
    ///
    /// Changes under `session.` must leave a non-zero default session length.
    /// On error the config is left unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        if key.starts_with("session.") {
            updated.session_config().map_err(|e| invalid(e.to_string()))?;
        }
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// The configured default session length.
    pub fn session_config(&self) -> Result<SessionConfig, SessionError> {
        SessionConfig::from_minutes_seconds(self.session.minutes, self.session.seconds)
    }

    /// Directory searched for track assets.
    pub fn assets_dir(&self) -> PathBuf {
        match &self.playback.assets_dir {
            Some(dir) => dir.clone(),
            None => data_dir()
                .map(|dir| dir.join("music"))
                .unwrap_or_else(|_| PathBuf::from("music")),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.session.minutes, 25);
        assert_eq!(parsed.playback.preview_window_secs, 15);
        assert_eq!(parsed.session.presets, vec![25, 45, 60]);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.session.minutes, 25);
        assert!(cfg.playback.selected_track.is_none());
        assert!(cfg.collection.seed.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("playback.preview_window_secs").as_deref(), Some("15"));
        assert_eq!(cfg.get("playback.selected_track").as_deref(), Some("null"));
        assert!(cfg.get("session.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.apply("session.minutes", "45").unwrap();
        assert_eq!(cfg.session.minutes, 45);
    }

    #[test]
    fn apply_sets_and_clears_optional_values() {
        let mut cfg = Config::default();
        cfg.apply("playback.selected_track", "3").unwrap();
        assert_eq!(cfg.playback.selected_track, Some(3));
        cfg.apply("collection.seed", "42").unwrap();
        assert_eq!(cfg.collection.seed, Some(42));
        cfg.apply("playback.assets_dir", "/tmp/music").unwrap();
        assert_eq!(cfg.playback.assets_dir, Some(PathBuf::from("/tmp/music")));
        cfg.apply("playback.assets_dir", "none").unwrap();
        assert!(cfg.playback.assets_dir.is_none());
        cfg.apply("playback.selected_track", "none").unwrap();
        assert!(cfg.playback.selected_track.is_none());
    }

    #[test]
    fn apply_updates_array() {
        let mut cfg = Config::default();
        cfg.apply("session.presets", "[10, 20]").unwrap();
        assert_eq!(cfg.session.presets, vec![10, 20]);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("session.nonexistent_key", "value"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.apply("", "value").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        let result = cfg.apply("session.minutes", "not_a_number");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg.session.minutes, 25);
    }

    #[test]
    fn apply_rejects_zero_session_length() {
        let mut cfg = Config::default();
        let result = cfg.apply("session.minutes", "0");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg.session.minutes, 25);

        cfg.apply("session.seconds", "30").unwrap();
        cfg.apply("session.minutes", "0").unwrap();
        assert_eq!(cfg.session_config().unwrap().duration_secs(), 30);
    }

    #[test]
    fn value_returns_typed_json() {
        let mut cfg = Config::default();
        assert_eq!(cfg.value("session.minutes").unwrap(), serde_json::json!(25));
        assert!(cfg.value("playback.selected_track").unwrap().is_null());
        cfg.apply("playback.selected_track", "4").unwrap();
        assert_eq!(cfg.value("playback.selected_track").unwrap(), serde_json::json!(4));
        assert!(matches!(cfg.value("playback.volume"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn session_config_from_defaults() {
        let mut cfg = Config::default();
        assert_eq!(cfg.session_config().unwrap().duration_secs(), 1500);
        cfg.session.minutes = 0;
        cfg.session.seconds = 0;
        assert!(cfg.session_config().is_err());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.session.minutes, 25);

        let mut changed = cfg.clone();
        changed.apply("session.minutes", "60").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().session.minutes, 60);
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
