//! Configuration management for wikigraph.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `wikigraph.toml` file
//! 3. User config `~/.config/wikigraph/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::access::AclRule;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page corpus location and layout.
    pub corpus: CorpusConfig,

    /// Traversal tuning.
    pub walker: WalkerConfig,

    /// Access-control authority selection.
    pub access: AccessConfig,

    /// HTTP server settings.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./wikigraph.toml` (project local)
    /// 2. `~/.config/wikigraph/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::read_file(LOCAL_CONFIG_FILE)?
        } else if let Some(user_config) = Self::user_config_path().filter(|p| p.exists()) {
            Self::read_file(&user_config)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path)?;

        // Apply environment variable overrides
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Path of the per-user config file, if a config dir exists on this platform.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Corpus overrides
        if let Some(dir) = lookup("WIKIGRAPH_DATA_DIR") {
            self.corpus.data_dir = dir;
        }
        if let Some(ext) = lookup("WIKIGRAPH_PAGE_EXTENSION") {
            self.corpus.page_extension = ext;
        }

        // Walker overrides
        if let Some(n) = lookup("WIKIGRAPH_MAX_CONCURRENT_READS").and_then(|v| v.parse().ok()) {
            self.walker.max_concurrent_reads = n;
        }

        // Access overrides
        if let Some(mode) = lookup("WIKIGRAPH_ACCESS_MODE").and_then(|v| AccessMode::parse(&v)) {
            self.access.mode = mode;
        }
        if let Some(url) = lookup("WIKIGRAPH_ACCESS_URL") {
            self.access.url = Some(url);
        }

        // Server overrides
        if let Some(host) = lookup("WIKIGRAPH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("WIKIGRAPH_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(secs) = lookup("WIKIGRAPH_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.server.request_timeout_secs = secs;
        }
    }

    /// Check cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.page_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("corpus.page_extension must not be empty".into()));
        }
        if self.walker.max_concurrent_reads == 0 {
            return Err(ConfigError::Invalid("walker.max_concurrent_reads must be at least 1".into()));
        }
        if self.access.mode == AccessMode::Http && self.access.url.is_none() {
            return Err(ConfigError::Invalid("access.url is required when access.mode = \"http\"".into()));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Page corpus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Root directory of the page tree.
    pub data_dir: String,

    /// Extension of page files (without leading dot).
    pub page_extension: String,

    /// Ignore dot-files and dot-directories.
    pub skip_hidden: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            page_extension: DEFAULT_PAGE_EXTENSION.to_string(),
            skip_hidden: DEFAULT_SKIP_HIDDEN,
        }
    }
}

/// Traversal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Maximum number of documents read concurrently.
    pub max_concurrent_reads: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
        }
    }
}

/// Which access-control authority answers read checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
    /// Every resource is readable.
    AllowAll,
    /// Rules from `access.rules`.
    Acl,
    /// Remote authority at `access.url`.
    Http,
}

impl AccessMode {
    /// Parse the kebab-case name used in config files.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "allow-all" | "allowall" => Some(Self::AllowAll),
            "acl" => Some(Self::Acl),
            "http" => Some(Self::Http),
            _ => None,
        }
    }
}

/// Access-control configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Authority selection.
    pub mode: AccessMode,

    /// Decision when no ACL rule matches (`acl` mode).
    pub default_read: bool,

    /// ACL rules (`acl` mode).
    pub rules: Vec<AclRule>,

    /// Endpoint of the remote authority (`http` mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Per-query timeout for the remote authority.
    pub timeout_secs: u64,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            mode: AccessMode::parse(DEFAULT_ACCESS_MODE).unwrap_or(AccessMode::AllowAll),
            default_read: DEFAULT_READ,
            rules: Vec::new(),
            url: None,
            timeout_secs: DEFAULT_ACCESS_TIMEOUT_SECS,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Upper bound for one graph build.
    pub request_timeout_secs: u64,

    /// Open the graph endpoint in a browser on start.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            open_browser: DEFAULT_OPEN_BROWSER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.corpus.data_dir, DEFAULT_DATA_DIR);
        assert_eq!(config.corpus.page_extension, DEFAULT_PAGE_EXTENSION);
        assert_eq!(config.access.mode, AccessMode::AllowAll);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[corpus]"));
        assert!(toml_str.contains("[walker]"));
        assert!(toml_str.contains("[access]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("mode = \"allow-all\""));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WIKIGRAPH_DATA_DIR", "/srv/wiki/pages"),
            ("WIKIGRAPH_PORT", "9000"),
            ("WIKIGRAPH_ACCESS_MODE", "acl"),
            ("WIKIGRAPH_MAX_CONCURRENT_READS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.corpus.data_dir, "/srv/wiki/pages");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.access.mode, AccessMode::Acl);
        assert_eq!(config.walker.max_concurrent_reads, DEFAULT_MAX_CONCURRENT_READS);
    }

    #[test]
    fn test_validate_rejects_http_without_url() {
        let mut config = Config::default();
        config.access.mode = AccessMode::Http;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.access.url = Some("http://localhost:8080/acl".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.walker.max_concurrent_reads = 0;
        assert!(config.validate().is_err());
    }
}
