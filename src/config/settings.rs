use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Placeholder replaced by the recipient's name in configured lines
const RECIPIENT_PLACEHOLDER: &str = "{recipient}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Name shown in the greeting and on the signature
    pub recipient: String,
    /// Name signed under the closing note
    pub sender: String,
    /// Lines revealed on the intro screen
    pub intro_lines: Vec<String>,
    /// Lines revealed on the closing note
    pub note_lines: Vec<String>,
    pub timing: TimingConfig,
    /// Heart layout scale (layout units per curve unit)
    pub heart_scale: f64,
    pub audio: AudioConfig,
    /// Mirror quiz answers into local storage
    pub persist_answers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Delay between intro lines
    pub intro_interval: Duration,
    /// Delay between closing note lines
    pub note_interval: Duration,
    /// Delay before the bouquet caption appears
    pub bouquet_text_delay: Duration,
    /// Redraw interval
    pub frame: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioConfig {
    pub enabled: bool,
    pub track: Option<PathBuf>,
    pub player: Option<PathBuf>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            intro_interval: Duration::from_millis(2000),
            note_interval: Duration::from_millis(2500),
            bouquet_text_delay: Duration::from_millis(2500),
            frame: Duration::from_millis(16),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipient: "Laylan".into(),
            sender: "Muath".into(),
            intro_lines: vec![
                "Hi {recipient}...".into(),
                "I've been thinking.".into(),
                "I wanted to do something special.".into(),
                "For someone very important to me.".into(),
            ],
            note_lines: vec![
                "Okay, being serious now.".into(),
                "I love you.".into(),
                "And I don't just want one day.".into(),
                "I want to make every day feel like this.".into(),
            ],
            timing: TimingConfig::default(),
            heart_scale: 8.5,
            audio: AudioConfig {
                enabled: true,
                track: None,
                player: None,
            },
            persist_answers: true,
        }
    }
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub recipient: Option<String>,
    pub sender: Option<String>,
    pub intro_lines: Option<Vec<String>>,
    pub note_lines: Option<Vec<String>>,
    pub timing: Option<TomlTimingConfig>,
    pub heart: Option<TomlHeartConfig>,
    pub audio: Option<TomlAudioConfig>,
    pub storage: Option<TomlStorageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlTimingConfig {
    pub intro_interval_ms: Option<u64>,
    pub note_interval_ms: Option<u64>,
    pub bouquet_text_delay_ms: Option<u64>,
    pub frame_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlHeartConfig {
    pub scale: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlAudioConfig {
    pub enabled: Option<bool>,
    pub track: Option<PathBuf>,
    pub player: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlStorageConfig {
    pub persist_answers: Option<bool>,
}

impl Config {
    /// Load configuration from the default file, merging with defaults.
    ///
    /// A missing file is created from the bundled example. An unreadable or invalid
    /// file is logged and the defaults are used.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Ignoring config file"
                );
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML document and merge it over the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();
        config.merge(toml_config)?;
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) -> Result<(), ConfigError> {
        if let Some(recipient) = toml_config.recipient {
            self.recipient = recipient;
        }
        if let Some(sender) = toml_config.sender {
            self.sender = sender;
        }
        if let Some(lines) = toml_config.intro_lines {
            if lines.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "intro_lines",
                    reason: "at least one line is required".into(),
                });
            }
            self.intro_lines = lines;
        }
        if let Some(lines) = toml_config.note_lines {
            if lines.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "note_lines",
                    reason: "at least one line is required".into(),
                });
            }
            self.note_lines = lines;
        }

        if let Some(timing) = toml_config.timing {
            if let Some(ms) = timing.intro_interval_ms {
                self.timing.intro_interval = Duration::from_millis(ms);
            }
            if let Some(ms) = timing.note_interval_ms {
                self.timing.note_interval = Duration::from_millis(ms);
            }
            if let Some(ms) = timing.bouquet_text_delay_ms {
                self.timing.bouquet_text_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = timing.frame_ms {
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        key: "timing.frame_ms",
                        reason: "must be greater than zero".into(),
                    });
                }
                self.timing.frame = Duration::from_millis(ms);
            }
        }

        if let Some(scale) = toml_config.heart.and_then(|h| h.scale) {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::Invalid {
                    key: "heart.scale",
                    reason: format!("must be a positive number, got {scale}"),
                });
            }
            self.heart_scale = scale;
        }

        if let Some(audio) = toml_config.audio {
            if let Some(enabled) = audio.enabled {
                self.audio.enabled = enabled;
            }
            if audio.track.is_some() {
                self.audio.track = audio.track.map(expand_home);
            }
            if audio.player.is_some() {
                self.audio.player = audio.player;
            }
        }

        if let Some(persist) = toml_config.storage.and_then(|s| s.persist_answers) {
            self.persist_answers = persist;
        }

        Ok(())
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Intro lines with the recipient's name filled in
    pub fn rendered_intro_lines(&self) -> Vec<String> {
        self.fill_recipient(&self.intro_lines)
    }

    /// Closing note lines with the recipient's name filled in
    pub fn rendered_note_lines(&self) -> Vec<String> {
        self.fill_recipient(&self.note_lines)
    }

    fn fill_recipient(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.replace(RECIPIENT_PLACEHOLDER, &self.recipient))
            .collect()
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    let expanded = path
        .strip_prefix("~")
        .ok()
        .and_then(|rest| dirs::home_dir().map(|home| home.join(rest)));
    expanded.unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config = Config::from_toml_str(EXAMPLE_CONFIG).unwrap();
        let defaults = Config::default();
        assert_eq!(config.recipient, defaults.recipient);
        assert_eq!(config.timing, defaults.timing);
        assert_eq!(config.heart_scale, defaults.heart_scale);
        assert!(config.persist_answers);
    }

    #[test]
    fn test_partial_config_merges_over_defaults() {
        let config = Config::from_toml_str(
            r#"
            recipient = "Sam"

            [timing]
            intro_interval_ms = 500

            [heart]
            scale = 3.0

            [storage]
            persist_answers = false
            "#,
        )
        .unwrap();

        assert_eq!(config.recipient, "Sam");
        assert_eq!(config.sender, Config::default().sender);
        assert_eq!(config.timing.intro_interval, Duration::from_millis(500));
        assert_eq!(config.timing.note_interval, Duration::from_millis(2500));
        assert_eq!(config.heart_scale, 3.0);
        assert!(!config.persist_answers);
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        let err = Config::from_toml_str("[heart]\nscale = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "heart.scale", .. }));
    }

    #[test]
    fn test_rejects_empty_lines() {
        let err = Config::from_toml_str("note_lines = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "note_lines", .. }));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_toml_str("colour = \"red\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_recipient_placeholder_is_filled() {
        let config = Config::default().with_recipient("Robin");
        assert_eq!(config.rendered_intro_lines()[0], "Hi Robin...");
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
