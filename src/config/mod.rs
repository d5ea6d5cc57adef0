//! Configuration for episodic.
//!
//! Configuration is read from `~/.config/episodic/config.toml` unless a path
//! is given. If the file doesn't exist, a default configuration with comments
//! is created.

use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub faults: FaultConfig,
    pub episodes: EpisodesConfig,
    pub cache: CacheConfig,
    pub tracking: TrackingConfig,
}

/// Where and how to reach the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rickandmortyapi.com/api".to_string(),
            timeout_secs: 10,
            user_agent: format!("episodic/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves `path` (e.g. `episode`) under `base_url`.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        Url::parse(&base)?.join(path.trim_start_matches('/'))
    }
}

/// Simulated failures and latency on image loads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    pub enabled: bool,
    /// Fail about once in this many loads; 0 never fails (default: 10)
    pub failure_one_in: u32,
    /// Upper bound of injected latency in milliseconds (default: 1000)
    pub max_delay_ms: u64,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_one_in: 10,
            max_delay_ms: 1000,
        }
    }
}

impl FaultConfig {
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EpisodesConfig {
    pub shuffle_characters: bool,
}

impl Default for EpisodesConfig {
    fn default() -> Self {
        Self {
            shuffle_characters: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of character cards kept in memory (default: 64)
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

impl CacheConfig {
    pub fn capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| ConfigError::Invalid("cache.capacity must be at least 1".into()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// One tracking observer is attached per label
    pub labels: Vec<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            labels: vec!["analytics".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/episodic/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("episodic").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api
            .endpoint("episode")
            .map_err(|e| ConfigError::Invalid(format!("api.base_url: {}", e)))?;
        self.cache.capacity()?;
        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> &'static str {
        r##"# episodic configuration

[api]
base_url = "https://rickandmortyapi.com/api"

# Request timeout in seconds
timeout_secs = 10

# user_agent = "episodic"

[faults]
# Randomly fail and delay image loads to exercise error and retry paths
enabled = true

# Fail about once in this many loads (0 never fails)
failure_one_in = 10

# Maximum injected latency in milliseconds
max_delay_ms = 1000

[episodes]
# Shuffle each episode's character list after loading
shuffle_characters = true

[cache]
# Character cards kept in memory
capacity = 64

[tracking]
# One tracking observer per label receives every page load event
labels = ["analytics"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
