//! Configuration loading and typed config structures for the Recon tracker.
//!
//! The canonical configuration lives in `recon-config.yaml` at the project
//! root. Every section is optional; anything missing falls back to the
//! values the host game's rules imply.

use std::path::Path;

use recon_timeline::FireRules;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds values the tracker cannot use.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What was wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tracker configuration.
///
/// Mirrors the structure of `recon-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReconConfig {
    /// Identity of the observing robot.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Thresholds for the shot heuristic.
    #[serde(default)]
    pub fire_rules: FireRules,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReconConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.observer.name.trim().is_empty() {
            return Err(invalid("observer.name must not be empty"));
        }

        let rules = &self.fire_rules;
        for (field, value) in [
            ("fire_rules.min_fire_cost", rules.min_fire_cost),
            ("fire_rules.max_fire_cost", rules.max_fire_cost),
            ("fire_rules.max_deceleration", rules.max_deceleration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!(
                    "{field} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        if rules.min_fire_cost > rules.max_fire_cost {
            return Err(invalid(&format!(
                "fire_rules.min_fire_cost ({}) exceeds fire_rules.max_fire_cost ({})",
                rules.min_fire_cost, rules.max_fire_cost
            )));
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

/// Identity of the observing robot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Name the host game reports for this robot. Observations carrying it
    /// are never tracked.
    #[serde(default = "default_observer_name")]
    pub name: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: default_observer_name(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_observer_name() -> String {
    "Recon".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ReconConfig::default();
        assert_eq!(config.observer.name, "Recon");
        assert_eq!(config.fire_rules, FireRules::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
observer:
  name: "team.Scout"

fire_rules:
  min_fire_cost: 0.2
  max_fire_cost: 2.5
  max_deceleration: 1.5

logging:
  level: "debug"
  json: true
"#;
        let config = ReconConfig::parse(yaml).unwrap();
        assert_eq!(config.observer.name, "team.Scout");
        assert!((config.fire_rules.min_fire_cost - 0.2).abs() < f64::EPSILON);
        assert!((config.fire_rules.max_fire_cost - 2.5).abs() < f64::EPSILON);
        assert!((config.fire_rules.max_deceleration - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let yaml = "
fire_rules:
  max_fire_cost: 2.0
";
        let config = ReconConfig::parse(yaml).unwrap();
        assert_eq!(config.observer, ObserverConfig::default());
        assert!((config.fire_rules.min_fire_cost - 0.1).abs() < f64::EPSILON);
        assert!((config.fire_rules.max_fire_cost - 2.0).abs() < f64::EPSILON);
        assert!((config.fire_rules.max_deceleration - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn parse_empty_yaml_uses_defaults() {
        let config = ReconConfig::parse("{}").unwrap();
        assert_eq!(config, ReconConfig::default());
    }

    #[test]
    fn empty_observer_name_rejected() {
        let err = ReconConfig::parse("observer:\n  name: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("observer.name"));
    }

    #[test]
    fn negative_cost_rejected() {
        let err = ReconConfig::parse("fire_rules:\n  min_fire_cost: -0.5\n").unwrap_err();
        assert!(err.to_string().contains("fire_rules.min_fire_cost"));
    }

    #[test]
    fn inverted_band_rejected() {
        let yaml = "
fire_rules:
  min_fire_cost: 3.0
  max_fire_cost: 0.1
";
        let err = ReconConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let err = ReconConfig::parse("fire_rules: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReconConfig::from_file(Path::new("/nonexistent/recon-config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
