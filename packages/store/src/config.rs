//! # Application configuration — `hydrate.toml`
//!
//! Defines the TOML file that lives in the app data directory next to the
//! key-value store (filename: [`AppConfig::filename`] = `"hydrate.toml"`). It is
//! read once at startup and tunes the reminder and picker behaviour.
//!
//! ## Structure
//!
//! ```toml
//! [reminders]
//! interval_secs = 30
//! title = "Hydration reminder"
//! body = "Time to drink some water!"
//!
//! [pickers]
//! inactivity_timeout_secs = 7
//! # inline = true        # override the platform default
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`AppConfig`] | Top-level config. Builder helpers, TOML (de)serialisation, [`AppConfig::load`], and the canonical filename. |
//! | [`ReminderConfig`] | Repeating reminder content and interval, default **30 seconds**. |
//! | [`PickerConfig`] | Auto-hide timeout for inline time pickers, default **7 seconds**, plus an optional inline override. |
//!
//! All structs derive or implement `Default` so that a missing or empty file is
//! equivalent to the default configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration stored in `hydrate.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub pickers: PickerConfig,
}

/// Repeating reminder configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_reminder_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_reminder_title")]
    pub title: String,
    #[serde(default = "default_reminder_body")]
    pub body: String,
}

/// Time picker configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Seconds without interaction before an inline picker hides itself.
    #[serde(default = "default_picker_timeout")]
    pub inactivity_timeout_secs: u64,
    /// Force inline (`true`) or modal (`false`) pickers. Platform default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

fn default_reminder_interval() -> u64 {
    30
}

fn default_reminder_title() -> String {
    "Hydration reminder".to_string()
}

fn default_reminder_body() -> String {
    "Time to drink some water!".to_string()
}

fn default_picker_timeout() -> u64 {
    7
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_reminder_interval(),
            title: default_reminder_title(),
            body: default_reminder_body(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_picker_timeout(),
            inline: None,
        }
    }
}

impl ReminderConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl PickerConfig {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// Whether pickers render inline, given the platform's own default.
    pub fn inline_or(&self, platform_default: bool) -> bool {
        self.inline.unwrap_or(platform_default)
    }
}

impl AppConfig {
    /// Builder method to set the reminder interval.
    #[cfg(test)]
    pub fn with_reminder_interval(mut self, secs: u64) -> Self {
        self.reminders.interval_secs = secs;
        self
    }

    /// Builder method to force inline or modal pickers.
    #[cfg(test)]
    pub fn with_inline_pickers(mut self, inline: bool) -> Self {
        self.pickers.inline = Some(inline);
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "hydrate.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    #[cfg(test)]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Ok(Self::from_toml(&s)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.reminders.interval(), Duration::from_secs(30));
        assert_eq!(config.pickers.inactivity_timeout(), Duration::from_secs(7));
        assert_eq!(config.pickers.inline, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [reminders]
            interval_secs = 3600

            [pickers]
            inline = false
            "#,
        )
        .unwrap();
        assert_eq!(config.reminders.interval_secs, 3600);
        assert_eq!(config.reminders.title, "Hydration reminder");
        assert_eq!(config.pickers.inactivity_timeout_secs, 7);
        assert!(!config.pickers.inline_or(true));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default()
            .with_reminder_interval(90)
            .with_inline_pickers(true);
        let s = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&s).unwrap(), config);
    }

    #[test]
    fn test_load_missing_and_invalid() {
        let dir = std::env::temp_dir().join(format!("hydrate_config_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join(AppConfig::filename());
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());

        std::fs::write(&path, "[reminders]\ninterval_secs = \"often\"\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
