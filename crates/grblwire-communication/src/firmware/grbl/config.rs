//! Protocol engine configuration

use grblwire_core::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for [`super::GrblController`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrblConfig {
    /// Longest partial line kept while waiting for a terminator
    pub line_buffer_capacity: usize,
    /// Minimum time between `?` status queries (200 ms = 5 Hz)
    pub status_poll_interval_ms: u64,
    /// Deadline for a blocking send
    pub ack_timeout_ms: u64,
    /// Upper bound on time spent draining input per `update` call
    pub update_budget_ms: u64,
}

impl Default for GrblConfig {
    fn default() -> Self {
        Self {
            line_buffer_capacity: 128,
            status_poll_interval_ms: 200,
            ack_timeout_ms: 100,
            update_budget_ms: 100,
        }
    }
}

impl GrblConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_millis(self.status_poll_interval_ms)
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }

    pub fn update_budget(&self) -> Duration {
        Duration::from_millis(self.update_budget_ms)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::File(format!("Failed to read {}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| ConfigError::Format(format!("Invalid JSON config: {}", e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| ConfigError::Format(format!("Invalid TOML config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Format(format!("Failed to serialize config: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Format(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content)
            .map_err(|e| ConfigError::File(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.line_buffer_capacity == 0 {
            return Err(invalid("line_buffer_capacity", "must be > 0"));
        }

        if self.status_poll_interval_ms == 0 {
            return Err(invalid("status_poll_interval_ms", "must be > 0"));
        }

        if self.ack_timeout_ms == 0 {
            return Err(invalid("ack_timeout_ms", "must be > 0"));
        }

        if self.update_budget_ms == 0 {
            return Err(invalid("update_budget_ms", "must be > 0"));
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> grblwire_core::Error {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(ConfigError::File("Config file must be .json or .toml".to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GrblConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.status_poll_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = GrblConfig {
            ack_timeout_ms: 0,
            ..GrblConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let config = GrblConfig {
            update_budget_ms: 0,
            ..GrblConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GrblConfig = toml::from_str("ack_timeout_ms = 250").unwrap();
        assert_eq!(config.ack_timeout_ms, 250);
        assert_eq!(config.line_buffer_capacity, 128);
    }
}
