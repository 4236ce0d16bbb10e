//! # Configuration Management
//!
//! Configuration for the address registry and for logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Example
//! ```toml
//! [registry]
//! register_builtins = true
//! disabled_builtins = ["utp"]
//!
//! [registry.aliases]
//! tcp46 = "tcp"
//!
//! [logging]
//! app_name = "multiaddr-net"
//! log_level = "debug"
//! json_format = false
//! ```

use crate::error::{MultiaddrError, Result};
use crate::net::convert::BUILTIN_KEYS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MultiaddrConfig {
    /// Address registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MultiaddrConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            MultiaddrError::ConfigError(format!("Failed to open config file: {e}"))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            MultiaddrError::ConfigError(format!("Failed to read config file: {e}"))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| MultiaddrError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(flag) = std::env::var("MULTIADDR_REGISTER_BUILTINS") {
            config.registry.register_builtins = parse_bool("MULTIADDR_REGISTER_BUILTINS", &flag)?;
        }

        if let Ok(list) = std::env::var("MULTIADDR_DISABLED_BUILTINS") {
            config.registry.disabled_builtins = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(level) = std::env::var("MULTIADDR_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                MultiaddrError::ConfigError(format!("Invalid log level: {level}"))
            })?;
        }

        if let Ok(flag) = std::env::var("MULTIADDR_LOG_JSON") {
            config.logging.json_format = parse_bool("MULTIADDR_LOG_JSON", &flag)?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            MultiaddrError::ConfigError(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(path, content).map_err(|e| {
            MultiaddrError::ConfigError(format!("Failed to write config file: {e}"))
        })?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.registry.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        strict(self.validate())
    }
}

/// Address registry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Install the built-in address types
    pub register_builtins: bool,

    /// Built-in keys to leave out (`tcp`, `udp`, `utp`, `ip4`, `ip6`, `ip+net`)
    pub disabled_builtins: Vec<String>,

    /// Extra native family names, each mapped to an already registered one
    pub aliases: BTreeMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            register_builtins: true,
            disabled_builtins: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Validate registry configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for name in &self.disabled_builtins {
            if !BUILTIN_KEYS.contains(&name.as_str()) {
                errors.push(format!(
                    "Unknown built-in address type: '{name}' (expected one of: {})",
                    BUILTIN_KEYS.join(", ")
                ));
            }
        }

        if !self.register_builtins && !self.disabled_builtins.is_empty() {
            errors.push(
                "disabled_builtins has no effect when register_builtins is false".to_string(),
            );
        }

        for (alias, target) in &self.aliases {
            if alias.is_empty() || target.is_empty() {
                errors.push(format!("Alias entries cannot be empty: '{alias}' -> '{target}'"));
            } else if alias == target {
                errors.push(format!("Alias '{alias}' refers to itself"));
            }
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        strict(self.validate())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("multiaddr-net"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

fn strict(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MultiaddrError::ConfigError(format!(
            "Configuration validation failed:\n  - {}",
            errors.join("\n  - ")
        )))
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(MultiaddrError::ConfigError(format!(
            "Invalid boolean for {var}: {other}"
        ))),
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
