use catalog_client::ClientConfig;
use catalog_client::config::{DEFAULT_BASE_URL, DEFAULT_RESOURCE};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a whole number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Catalog manager configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_API_URL | https://68c3e48081ff90c8e61a7736.mockapi.io | Store base URL |
/// | CATALOG_RESOURCE | product | REST resource name |
/// | CATALOG_TIMEOUT_SECS | (none) | Per-request timeout |
/// | CATALOG_LOG_LEVEL | (none) | Log filter, overrides RUST_LOG |
/// | CATALOG_LOG_DIR | (none) | Directory for daily log files |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub resource: String,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (empty values count as unset)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if url::Url::parse(&api_url).is_err() {
            return Err(ConfigError::InvalidUrl {
                var: "CATALOG_API_URL",
                value: api_url,
            });
        }

        let timeout_secs = match get("CATALOG_TIMEOUT_SECS") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: "CATALOG_TIMEOUT_SECS",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            api_url,
            resource: get("CATALOG_RESOURCE").unwrap_or_else(|| DEFAULT_RESOURCE.into()),
            timeout_secs,
            log_level: get("CATALOG_LOG_LEVEL"),
            log_dir: get("CATALOG_LOG_DIR").map(PathBuf::from),
        })
    }

    /// Client configuration for the remote store
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url).with_resource(&self.resource);
        match self.timeout_secs {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            resource: DEFAULT_RESOURCE.into(),
            timeout_secs: None,
            log_level: None,
            log_dir: None,
        }
    }
}
