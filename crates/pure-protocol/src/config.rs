//! Registry Configuration
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (PURE_PROTOCOL_*)
//! 2. Config file (`<config dir>/pure-protocol/config.toml`)
//! 3. Default values

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::mapper::DEFAULT_TYPE_PROPERTY;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PURE_PROTOCOL_CONFIG";

/// Environment variable with extra excluded tags, comma separated
pub const EXCLUDED_SUBTYPES_ENV: &str = "PURE_PROTOCOL_EXCLUDED_SUBTYPES";

/// Extension registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON property carrying the sub type tag (default: "_type")
    #[serde(default = "default_type_property")]
    pub type_property: String,

    /// Tags never registered, whichever extension contributes them
    #[serde(default)]
    pub excluded_subtypes: Vec<String>,

    /// Extension names left out of discovery
    #[serde(default)]
    pub disabled_extensions: Vec<String>,

    /// Log the extension list before each configuration pass (default: true)
    #[serde(default = "default_true")]
    pub log_extensions: bool,
}

fn default_type_property() -> String {
    DEFAULT_TYPE_PROPERTY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            type_property: default_type_property(),
            excluded_subtypes: Vec::new(),
            disabled_extensions: Vec::new(),
            log_extensions: default_true(),
        }
    }
}

impl RegistryConfig {
    /// Load from the config file if it exists, then apply the environment
    pub fn load() -> Result<Self, ConfigValidationError> {
        let path = Self::config_path();
        let config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };

        let config = config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigValidationError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigValidationError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            PathBuf::from(path)
        } else {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pure-protocol")
                .join("config.toml")
        }
    }

    /// Merge excluded tags from the environment
    pub fn apply_env(self) -> Self {
        match std::env::var(EXCLUDED_SUBTYPES_ENV) {
            Ok(value) => self.merge_excluded_list(&value),
            Err(_) => self,
        }
    }

    /// Merge a comma separated list of excluded tags
    pub fn merge_excluded_list(self, list: &str) -> Self {
        self.with_excluded_subtypes(list.split(',').map(str::trim).filter(|t| !t.is_empty()))
    }

    /// Set the type property
    pub fn with_type_property(mut self, property: impl Into<String>) -> Self {
        self.type_property = property.into();
        self
    }

    /// Add excluded tags, ignoring ones already present
    pub fn with_excluded_subtypes(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            let tag = tag.into();
            if !self.excluded_subtypes.contains(&tag) {
                self.excluded_subtypes.push(tag);
            }
        }
        self
    }

    /// Add disabled extension names
    pub fn with_disabled_extensions(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.disabled_extensions.extend(names.into_iter().map(Into::into));
        self
    }

    /// Enable or disable extension list logging
    pub fn with_log_extensions(mut self, enabled: bool) -> Self {
        self.log_extensions = enabled;
        self
    }

    /// Excluded tags as a set
    pub fn excluded_set(&self) -> HashSet<String> {
        self.excluded_subtypes.iter().cloned().collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.type_property.trim().is_empty() {
            return Err(ConfigValidationError::InvalidValue {
                field: "type_property".into(),
                message: "must not be empty".into(),
            });
        }

        if self.excluded_subtypes.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigValidationError::InvalidValue {
                field: "excluded_subtypes".into(),
                message: "tags must not be empty".into(),
            });
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("failed to read config file {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.type_property, "_type");
        assert!(config.excluded_subtypes.is_empty());
        assert!(config.log_extensions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RegistryConfig::default()
            .with_type_property("@type")
            .with_excluded_subtypes(["redshift", "bigQuery"])
            .with_excluded_subtypes(["redshift"])
            .with_disabled_extensions(["LegacyExtension"])
            .with_log_extensions(false);

        assert_eq!(config.type_property, "@type");
        assert_eq!(config.excluded_subtypes, vec!["redshift", "bigQuery"]);
        assert_eq!(config.disabled_extensions, vec!["LegacyExtension"]);
        assert!(!config.log_extensions);
        assert!(config.excluded_set().contains("bigQuery"));
    }

    #[test]
    fn test_merge_excluded_list() {
        let config = RegistryConfig::default().merge_excluded_list(" static, ,snowflake ");
        assert_eq!(config.excluded_subtypes, vec!["static", "snowflake"]);
    }

    #[test]
    fn test_load_applies_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "excluded_subtypes = [\"h2Embedded\"]\n").unwrap();

        // Save current values to restore later
        let old_config = std::env::var(CONFIG_ENV).ok();
        let old_excluded = std::env::var(EXCLUDED_SUBTYPES_ENV).ok();
        // SAFETY: no other test reads these variables, and they are restored below
        unsafe {
            std::env::set_var(CONFIG_ENV, &path);
            std::env::set_var(EXCLUDED_SUBTYPES_ENV, "bigQuery, h2Embedded");
        }

        let config = RegistryConfig::load();

        // SAFETY: restoring the environment to its previous state
        unsafe {
            for (key, old) in [(CONFIG_ENV, old_config), (EXCLUDED_SUBTYPES_ENV, old_excluded)] {
                match old {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }

        let config = config.unwrap();
        assert_eq!(config.excluded_subtypes, vec!["h2Embedded", "bigQuery"]);
        assert!(config.excluded_set().contains("bigQuery"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = RegistryConfig::default();
        config.type_property = " ".into();
        assert!(config.validate().is_err());

        let mut config = RegistryConfig::default();
        config.excluded_subtypes.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "excluded_subtypes = [\"h2Embedded\"]\nlog_extensions = false\n",
        )
        .unwrap();

        let config = RegistryConfig::load_from(&path).unwrap();
        assert_eq!(config.type_property, "_type");
        assert_eq!(config.excluded_subtypes, vec!["h2Embedded"]);
        assert!(!config.log_extensions);
    }

    #[test]
    fn test_load_from_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = RegistryConfig::load_from(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigValidationError::Read { .. })));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "excluded_subtypes = 3").unwrap();
        assert!(matches!(
            RegistryConfig::load_from(&path),
            Err(ConfigValidationError::Parse { .. })
        ));

        std::fs::write(&path, "type_property = \"\"").unwrap();
        assert!(matches!(
            RegistryConfig::load_from(&path),
            Err(ConfigValidationError::InvalidValue { .. })
        ));
    }
}
