//! Configuration handling for the analyzer.
//!
//! Every knob has a built-in default; `Config::from_env` lets a deployment
//! override them through `SEOCHECK_*` environment variables. Values that are
//! present but malformed are rejected with a `ConfigError` instead of being
//! silently replaced by the default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Environment variable names. Public so the binary and tests can refer to them.
pub const ENV_USER_AGENT: &str = "SEOCHECK_USER_AGENT";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "SEOCHECK_FETCH_TIMEOUT_SECS";
pub const ENV_PROBE_TIMEOUT_SECS: &str = "SEOCHECK_PROBE_TIMEOUT_SECS";
pub const ENV_LINK_SAMPLE_LIMIT: &str = "SEOCHECK_LINK_SAMPLE_LIMIT";
pub const ENV_BATCH_DELAY_MS: &str = "SEOCHECK_BATCH_DELAY_MS";
pub const ENV_MAX_REDIRECTS: &str = "SEOCHECK_MAX_REDIRECTS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_LINK_SAMPLE_LIMIT: usize = 20;
const DEFAULT_BATCH_DELAY_MS: u64 = 1000;
const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Analyzer runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    user_agent: String,
    fetch_timeout: Duration,
    probe_timeout: Duration,
    link_sample_limit: usize,
    batch_delay: Duration,
    max_redirects: usize,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let user_agent = env::var(ENV_USER_AGENT)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.user_agent);

        let fetch_timeout_secs: u64 = parse_var(ENV_FETCH_TIMEOUT_SECS, "fetch_timeout_secs")?
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        let probe_timeout_secs: u64 = parse_var(ENV_PROBE_TIMEOUT_SECS, "probe_timeout_secs")?
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);
        let link_sample_limit: usize = parse_var(ENV_LINK_SAMPLE_LIMIT, "link_sample_limit")?
            .unwrap_or(DEFAULT_LINK_SAMPLE_LIMIT);
        let batch_delay_ms: u64 =
            parse_var(ENV_BATCH_DELAY_MS, "batch_delay_ms")?.unwrap_or(DEFAULT_BATCH_DELAY_MS);
        let max_redirects: usize =
            parse_var(ENV_MAX_REDIRECTS, "max_redirects")?.unwrap_or(DEFAULT_MAX_REDIRECTS);

        if fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if probe_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            user_agent,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            probe_timeout: Duration::from_secs(probe_timeout_secs),
            link_sample_limit,
            batch_delay: Duration::from_millis(batch_delay_ms),
            max_redirects,
        })
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_link_sample_limit(mut self, limit: usize) -> Self {
        self.link_sample_limit = limit;
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Identifying header sent on every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    /// Timeout for the primary document fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
    /// Timeout for robots.txt, sitemap.xml and link probes.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }
    /// How many discovered links get probed per page.
    pub fn link_sample_limit(&self) -> usize {
        self.link_sample_limit
    }
    /// Pause between consecutive URLs of a batch.
    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            link_sample_limit: DEFAULT_LINK_SAMPLE_LIMIT,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

fn parse_var<T>(key: &str, field: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field,
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
