//! TOML-based application configuration.
//!
//! Stores operator preferences including:
//! - Meeting length and transition buffer
//! - Autosave interval
//! - Display text (welcome, start-of-hours and end-of-hours messages)
//! - Whether cues ring the terminal bell
//!
//! Configuration is stored at `~/.config/officehours/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::display::DisplayText;
use crate::error::ConfigError;
use crate::timer::TimerSettings;

/// Meeting timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingConfig {
    #[serde(default = "default_minutes")]
    pub minutes: u32,
    #[serde(default = "default_transition_seconds")]
    pub transition_seconds: u64,
    /// Seconds between autosaves; 0 disables autosave.
    #[serde(default = "default_save_interval_seconds")]
    pub save_interval_seconds: u64,
}

/// Display text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_empty_lines_above")]
    pub empty_lines_above: usize,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_starting_message")]
    pub starting_message: String,
    #[serde(default = "default_ending_message")]
    pub ending_message: String,
}

/// Cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/officehours/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub meeting: MeetingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cues: CuesConfig,
}

// Default functions
fn default_minutes() -> u32 {
    15
}
fn default_transition_seconds() -> u64 {
    60
}
fn default_save_interval_seconds() -> u64 {
    60
}
fn default_empty_lines_above() -> usize {
    2
}
fn default_welcome_message() -> String {
    "Welcome to office hours!\nAdd your name to the queue when you arrive.".into()
}
fn default_starting_message() -> String {
    "Office hours will start soon.".into()
}
fn default_ending_message() -> String {
    "Office hours will end soon.".into()
}
fn default_true() -> bool {
    true
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            minutes: default_minutes(),
            transition_seconds: default_transition_seconds(),
            save_interval_seconds: default_save_interval_seconds(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            empty_lines_above: default_empty_lines_above(),
            welcome_message: default_welcome_message(),
            starting_message: default_starting_message(),
            ending_message: default_ending_message(),
        }
    }
}

impl Default for CuesConfig {
    fn default() -> Self {
        Self { enabled: true }
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
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    // Allow "\n" escapes so multi-line messages can be set from a shell.
                    _ => serde_json::Value::String(value.replace("\\n", "\n")),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default config file location.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
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

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
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

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the field's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Set a config value by key and save to `path`.
    pub fn set(&mut self, key: &str, value: &str, path: &Path) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save_to(path)
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            meeting_minutes: self.meeting.minutes.max(1),
            transition_seconds: self.meeting.transition_seconds,
        }
    }

    pub fn display_text(&self) -> DisplayText {
        DisplayText {
            empty_lines_above: self.display.empty_lines_above,
            starting_message: self.display.starting_message.clone(),
            ending_message: self.display.ending_message.clone(),
        }
    }

    /// Hand the config file at `path` to the system's default opener.
    pub fn open_in_editor(path: &Path) -> Result<(), ConfigError> {
        open::that_detached(path).map_err(|source| ConfigError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })
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
        assert_eq!(parsed.meeting.minutes, 15);
        assert_eq!(parsed.display.welcome_message, cfg.display.welcome_message);
        assert!(parsed.cues.enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[meeting]\nminutes = 20\n").unwrap();
        assert_eq!(parsed.meeting.minutes, 20);
        assert_eq!(parsed.meeting.transition_seconds, 60);
        assert_eq!(parsed.display.empty_lines_above, 2);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("meeting.minutes").as_deref(), Some("15"));
        assert_eq!(cfg.get("cues.enabled").as_deref(), Some("true"));
        assert!(cfg.get("meeting.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_number_bool_and_string() {
        let mut cfg = Config::default();
        cfg.set_value("meeting.minutes", "20").unwrap();
        cfg.set_value("cues.enabled", "false").unwrap();
        cfg.set_value("display.ending_message", "bye\\nsee you").unwrap();
        assert_eq!(cfg.meeting.minutes, 20);
        assert!(!cfg.cues.enabled);
        assert_eq!(cfg.display.ending_message, "bye\nsee you");
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("meeting.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set_value("meeting", "1").is_err());
    }

    #[test]
    fn set_value_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("cues.enabled", "loud").is_err());
        assert!(cfg.set_value("meeting.minutes", "-3").is_err());
        assert_eq!(cfg.meeting.minutes, 15);
    }

    #[test]
    fn timer_settings_follow_meeting_section() {
        let mut cfg = Config::default();
        cfg.meeting.minutes = 25;
        cfg.meeting.transition_seconds = 30;
        let settings = cfg.timer_settings();
        assert_eq!(settings.max_individual_seconds(), 1530);
        assert_eq!(settings.min_empty_waitlist_seconds(), 750);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.meeting.minutes, 15);
        assert!(path.exists());
    }

    #[test]
    fn set_persists_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::load_from(&path).unwrap();
        cfg.set("meeting.save_interval_seconds", "0", &path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.meeting.save_interval_seconds, 0);
    }

    #[test]
    fn load_from_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "meeting = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
