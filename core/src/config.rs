//! Client configuration.
//!
//! A `ClientConfig` is consumed once by `LoopsClient::from_config`. The
//! client never re-reads it, so switching API keys means building a new
//! client.

use std::fmt;
use std::time::Duration;

use crate::error::{LoopsError, Result};

/// Production base URL of the Loops API.
pub const DEFAULT_BASE_URL: &str = "https://app.loops.so/api/";

pub const API_KEY_ENV: &str = "LOOPS_API_KEY";
pub const BASE_URL_ENV: &str = "LOOPS_BASE_URL";

#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Point the client at another host. A trailing `/` is added if missing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read `LOOPS_API_KEY` (required) and `LOOPS_BASE_URL` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LoopsError::Config(format!("{API_KEY_ENV} not set")))?;

        let config = Self::new(api_key);
        Ok(match lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
