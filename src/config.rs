//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::mascot::{MessageCatalog, MessageCategory};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mascot: MascotConfig,

    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub chrome: ChromeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mascot timing and behavior
#[derive(Debug, Clone, Deserialize)]
pub struct MascotConfig {
    #[serde(default = "default_duration")]
    pub default_duration_ms: u64,

    #[serde(default = "default_fade")]
    pub fade_ms: u64,

    #[serde(default = "default_greeting_duration")]
    pub greeting_duration_ms: u64,

    #[serde(default = "default_idle_interval")]
    pub idle_interval_ms: u64,

    #[serde(default = "default_idle_chance")]
    pub idle_chance: f64,

    #[serde(default = "default_progress_poll")]
    pub progress_poll_ms: u64,

    #[serde(default = "default_progress_message")]
    pub progress_message_ms: u64,

    #[serde(default = "default_cancel_progress")]
    pub cancel_progress_on_complete: bool,
}

fn default_duration() -> u64 {
    4000
}

fn default_fade() -> u64 {
    300
}

fn default_greeting_duration() -> u64 {
    5000
}

fn default_idle_interval() -> u64 {
    30_000 // 30 seconds
}

fn default_idle_chance() -> f64 {
    0.3
}

fn default_progress_poll() -> u64 {
    5000 // 5 seconds
}

fn default_progress_message() -> u64 {
    3000
}

fn default_cancel_progress() -> bool {
    true
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration(),
            fade_ms: default_fade(),
            greeting_duration_ms: default_greeting_duration(),
            idle_interval_ms: default_idle_interval(),
            idle_chance: default_idle_chance(),
            progress_poll_ms: default_progress_poll(),
            progress_message_ms: default_progress_message(),
            cancel_progress_on_complete: default_cancel_progress(),
        }
    }
}

/// Optional replacements for the built-in message pools
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesConfig {
    pub default: Option<Vec<String>>,
    pub thinking: Option<Vec<String>>,
    pub working: Option<Vec<String>>,
    pub happy: Option<Vec<String>>,
    pub tips: Option<Vec<String>>,
}

impl MessagesConfig {
    /// Pools that replace the built-in ones
    pub fn overrides(&self) -> BTreeMap<MessageCategory, Vec<String>> {
        let entries = [
            (MessageCategory::Default, &self.default),
            (MessageCategory::Thinking, &self.thinking),
            (MessageCategory::Working, &self.working),
            (MessageCategory::Happy, &self.happy),
            (MessageCategory::Tips, &self.tips),
        ];

        entries
            .into_iter()
            .filter_map(|(category, pool)| pool.as_ref().map(|p| (category, p.clone())))
            .collect()
    }

    /// Built-in catalog with these overrides applied
    pub fn catalog(&self) -> MessageCatalog {
        MessageCatalog::with_overrides(&self.overrides())
    }
}

/// Page chrome behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ChromeConfig {
    #[serde(default = "default_max_url_lines")]
    pub max_url_lines: usize,

    #[serde(default = "default_alert_dismiss")]
    pub alert_dismiss_ms: u64,
}

fn default_max_url_lines() -> usize {
    100_000
}

fn default_alert_dismiss() -> u64 {
    5000
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            max_url_lines: default_max_url_lines(),
            alert_dismiss_ms: default_alert_dismiss(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("indexy").join("config.toml")),
            Some(PathBuf::from("/etc/indexy/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("INDEXY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INDEXY_LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(chance) = std::env::var("INDEXY_IDLE_CHANCE") {
            match chance.parse::<f64>() {
                Ok(c) if (0.0..=1.0).contains(&c) => self.mascot.idle_chance = c,
                _ => tracing::warn!("Ignoring INDEXY_IDLE_CHANCE={}", chance),
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mascot.idle_chance) {
            return Err(ConfigError::Invalid(format!(
                "mascot.idle_chance must be within 0..=1, got {}",
                self.mascot.idle_chance
            )));
        }
        if self.mascot.idle_interval_ms == 0 || self.mascot.progress_poll_ms == 0 {
            return Err(ConfigError::Invalid(
                "mascot intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Indexy Configuration
#
# Environment variables override these settings:
# - INDEXY_LOG_LEVEL
# - INDEXY_LOG_FORMAT
# - INDEXY_IDLE_CHANCE

[mascot]
# How long a message stays up when no duration is given (ms)
default_duration_ms = 4000

# Fade-out window between messages (ms)
fade_ms = 300

# How long page greetings stay up (ms)
greeting_duration_ms = 5000

# Idle chatter check interval (ms) and the chance it speaks
idle_interval_ms = 30000
idle_chance = 0.3

# Processing page progress polling (ms)
progress_poll_ms = 5000
progress_message_ms = 3000

# Stop polling once progress reaches 100%
cancel_progress_on_complete = true

[messages]
# Replace a built-in message pool, e.g.
# tips = ["Tip: Submit your sitemap first."]

[chrome]
# Most URLs accepted in one batch
max_url_lines = 100000

# Alerts close themselves after this long (ms)
alert_dismiss_ms = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_template_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.mascot.default_duration_ms, 4000);
        assert_eq!(config.mascot.fade_ms, 300);
        assert_eq!(config.mascot.idle_interval_ms, 30_000);
        assert_eq!(config.chrome.max_url_lines, 100_000);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.messages.overrides().is_empty());
    }

    #[test]
    fn test_message_overrides() {
        let config = Config::parse(
            r#"
            [messages]
            tips = ["Tip: one", "Tip: two"]
            happy = []
            "#,
        )
        .unwrap();

        let overrides = config.messages.overrides();
        assert_eq!(overrides.len(), 2);
        let catalog = config.messages.catalog();
        assert_eq!(catalog.messages(MessageCategory::Tips).len(), 2);
        assert!(catalog.messages(MessageCategory::Happy).is_empty());
        assert_eq!(catalog.messages(MessageCategory::Working).len(), 5);
    }

    #[test]
    fn test_invalid_idle_chance() {
        let result = Config::parse("[mascot]\nidle_chance = 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[mascot]\nfade_ms = 250\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.mascot.fade_ms, 250);
        assert_eq!(config.mascot.default_duration_ms, 4000);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[mascot\n").unwrap();

        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
