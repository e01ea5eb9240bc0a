//! Configuration management for the lineseek service.
//!
//! Loads configuration from a TOML file and environment variables,
//! with sensible defaults for all settings. Built once at startup
//! and handed to the service constructors; there is no ambient
//! global state.

use crate::core::error::{LineseekError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory whose immediate subdirectories are the indexes
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Number of hits returned when the request does not ask for a size
    #[serde(default = "default_size")]
    pub default_size: usize,

    /// Hard cap on hits per page
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Hard cap on the hit offset a request may page to
    #[serde(default = "default_max_from")]
    pub max_from: usize,

    /// Maximum characters per highlighted fragment
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,

    /// Per-request search timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8095
}

fn default_data_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_size() -> usize {
    25
}

fn default_max_size() -> usize {
    1000
}

fn default_max_from() -> usize {
    10_000
}

fn default_snippet_max_chars() -> usize {
    150
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_size: default_size(),
            max_size: default_max_size(),
            max_from: default_max_from(),
            snippet_max_chars: default_snippet_max_chars(),
            timeout_sec: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LineseekError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// Reads `./lineseek.toml` when present; otherwise starts from
    /// defaults. `LINESEEK_*` environment variables override either.
    pub fn load() -> Result<Self> {
        let mut config = if Path::new("lineseek.toml").exists() {
            Self::from_file("lineseek.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(host) = env::var("LINESEEK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("LINESEEK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(data_root) = env::var("LINESEEK_DATA_ROOT") {
            self.storage.data_root = PathBuf::from(data_root);
        }
        if let Ok(size) = env::var("LINESEEK_DEFAULT_SIZE") {
            if let Ok(s) = size.parse() {
                self.search.default_size = s;
            }
        }
        if let Ok(size) = env::var("LINESEEK_MAX_SIZE") {
            if let Ok(s) = size.parse() {
                self.search.max_size = s;
            }
        }
        if let Ok(from) = env::var("LINESEEK_MAX_FROM") {
            if let Ok(f) = from.parse() {
                self.search.max_from = f;
            }
        }
        if let Ok(chars) = env::var("LINESEEK_SNIPPET_MAX_CHARS") {
            if let Ok(c) = chars.parse() {
                self.search.snippet_max_chars = c;
            }
        }
        if let Ok(timeout) = env::var("LINESEEK_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.search.timeout_sec = t;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.search.default_size == 0 {
            return Err(LineseekError::ConfigError(
                "Default page size must be non-zero".to_string(),
            ));
        }

        if self.search.default_size > self.search.max_size {
            return Err(LineseekError::ConfigError(
                "Default page size cannot exceed max page size".to_string(),
            ));
        }

        if self.search.snippet_max_chars == 0 {
            return Err(LineseekError::ConfigError(
                "Snippet max chars must be non-zero".to_string(),
            ));
        }

        if self.search.timeout_sec == 0 {
            return Err(LineseekError::ConfigError(
                "Search timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log effective configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Bind: {}:{}", self.server.host, self.server.port);
        tracing::info!("  Data root: {:?}", self.storage.data_root);
        tracing::info!("  Default page size: {}", self.search.default_size);
        tracing::info!("  Max page size: {}", self.search.max_size);
        tracing::info!("  Max page offset: {}", self.search.max_from);
        tracing::info!("  Snippet max chars: {}", self.search.snippet_max_chars);
        tracing::info!("  Search timeout: {}s", self.search.timeout_sec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8095);
        assert_eq!(config.storage.data_root, PathBuf::from("./data"));
        assert_eq!(config.search.default_size, 25);
        assert_eq!(config.search.max_size, 1000);
        assert_eq!(config.search.max_from, 10_000);
    }

    #[test]
    fn test_config_validation_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_default_size() {
        let mut config = Config::default();
        config.search.default_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_default_exceeds_max() {
        let mut config = Config::default();
        config.search.default_size = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.search.timeout_sec = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_env_var_override() {
        env::set_var("LINESEEK_DEFAULT_SIZE", "50");
        env::set_var("LINESEEK_DATA_ROOT", "/srv/indexes");

        let mut config = Config::default();
        config.merge_env();

        assert_eq!(config.search.default_size, 50);
        assert_eq!(config.storage.data_root, PathBuf::from("/srv/indexes"));

        // Cleanup
        env::remove_var("LINESEEK_DEFAULT_SIZE");
        env::remove_var("LINESEEK_DATA_ROOT");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            data_root = "/data/indexes"

            [search]
            default_size = 10
            max_size = 200
            snippet_max_chars = 80
            timeout_sec = 5
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.data_root, PathBuf::from("/data/indexes"));
        assert_eq!(config.search.default_size, 10);
        assert_eq!(config.search.max_size, 200);
        assert_eq!(config.search.snippet_max_chars, 80);
        assert_eq!(config.search.timeout_sec, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [storage]
            data_root = "/data/indexes"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8095);
        assert_eq!(config.search.default_size, 25);
    }
}
