//! Client configuration shared by `MiraCms` and `MiraForm`.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "MIRA_BASE_URL";
pub const TIMEOUT_VAR: &str = "MIRA_TIMEOUT_MS";

/// Immutable connection settings for a client.
///
/// `base_url` is the scheme and host (plus optional prefix) that endpoint
/// paths are appended to. A single trailing `/` is dropped; nothing else is
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: None,
        }
    }

    /// Abort requests that take longer than `timeout` end to end. A zero
    /// duration clears the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout).filter(|timeout| !timeout.is_zero());
        self
    }

    /// Read `MIRA_BASE_URL` and the optional `MIRA_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;
        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|millis| *millis > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
