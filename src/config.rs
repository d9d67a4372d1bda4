//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Setmore API base URL.
pub const DEFAULT_BASE_URL: &str = "https://developer.setmore.com/api/v1";

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Setmore API base URL (overridable for testing)
    pub base_url: String,
    /// Long-lived refresh credential exchanged for access tokens
    pub refresh_token: String,
    /// Directory holding the persisted staff/service directories
    pub cache_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Upper bound on pages followed in one appointment fetch
    pub max_pages: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("refresh_token", &"<redacted>")
            .field("cache_dir", &self.cache_dir)
            .field("request_timeout", &self.request_timeout)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

impl Config {
    /// Config for tests, pointed at `base_url` (usually a mock server).
    pub fn test_default(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            refresh_token: "test_refresh_token".to_string(),
            cache_dir: PathBuf::from(".setmore-cache"),
            request_timeout: Duration::from_secs(5),
            max_pages: 100,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        // REFRESH_TOKEN is the name older setups used
        let refresh_token = env::var("SETMORE_REFRESH_TOKEN")
            .or_else(|_| env::var("REFRESH_TOKEN"))
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("SETMORE_REFRESH_TOKEN"))?;

        if refresh_token.is_empty() {
            return Err(ConfigError::Invalid {
                name: "SETMORE_REFRESH_TOKEN",
                reason: "must not be empty".to_string(),
            });
        }

        let timeout_secs: u64 = parse_or_default("SETMORE_REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            base_url: env::var("SETMORE_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            refresh_token,
            cache_dir: env::var("SETMORE_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".setmore-cache")),
            request_timeout: Duration::from_secs(timeout_secs),
            max_pages: parse_or_default("SETMORE_MAX_PAGES", 10_000)?,
        })
    }
}

fn parse_or_default<T: std::str::FromStr>(
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("could not parse {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
