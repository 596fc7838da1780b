//! Configuration loaded from TOML.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Per-turn timer budget.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Seconds each turn starts with.
    #[serde(default = "default_total_time")]
    total_time: u32,

    /// Elapsed seconds after which the warning fires.
    #[serde(default = "default_warning_time")]
    warning_time: u32,

    /// Milliseconds between countdown ticks.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,
}

#[instrument]
fn default_total_time() -> u32 {
    30
}

#[instrument]
fn default_warning_time() -> u32 {
    20
}

#[instrument]
fn default_tick_millis() -> u64 {
    1000
}

impl TimerConfig {
    /// Creates a validated timer configuration with one-second ticks.
    #[instrument]
    pub fn new(total_time: u32, warning_time: u32) -> Result<Self, ConfigError> {
        let config = Self {
            total_time,
            warning_time,
            tick_millis: default_tick_millis(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Seconds remaining at which the warning fires.
    pub fn warning_threshold(&self) -> u32 {
        self.total_time.saturating_sub(self.warning_time)
    }

    /// Interval between ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Checks that the budget is positive and the warning lands inside it.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_time == 0 {
            return Err(ConfigError::new("timer.total_time must be positive"));
        }
        if self.warning_time == 0 || self.warning_time >= self.total_time {
            return Err(ConfigError::new(format!(
                "timer.warning_time must be between 1 and {}, got {}",
                self.total_time - 1,
                self.warning_time
            )));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::new("timer.tick_millis must be positive"));
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            total_time: default_total_time(),
            warning_time: default_warning_time(),
            tick_millis: default_tick_millis(),
        }
    }
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    filter: String,
}

#[instrument]
fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardsConfig {
    /// Turn timer.
    #[serde(default)]
    timer: TimerConfig,

    /// Logging.
    #[serde(default)]
    logging: LoggingConfig,
}

impl BoardsConfig {
    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.timer.validate()?;
        debug!(?config, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            total_time = config.timer.total_time,
            warning_time = config.timer.warning_time,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardsConfig::default();
        assert_eq!(*config.timer().total_time(), 30);
        assert_eq!(config.timer().warning_threshold(), 10);
        assert_eq!(config.timer().tick_period(), Duration::from_secs(1));
        assert_eq!(config.logging().filter(), "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BoardsConfig::from_toml_str("[timer]\ntotal_time = 60\n").unwrap();
        assert_eq!(*config.timer().total_time(), 60);
        assert_eq!(*config.timer().warning_time(), 20);
        assert_eq!(config.timer().warning_threshold(), 40);
    }

    #[test]
    fn test_warning_outside_budget_rejected() {
        let err = BoardsConfig::from_toml_str("[timer]\ntotal_time = 10\nwarning_time = 10\n");
        assert!(err.is_err());
        assert!(TimerConfig::new(30, 0).is_err());
        assert!(TimerConfig::new(0, 0).is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = BoardsConfig::from_toml_str("[timer\n").unwrap_err();
        assert!(err.message.contains("parse"));
    }
}
