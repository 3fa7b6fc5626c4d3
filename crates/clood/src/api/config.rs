//! Client configuration.

use std::time::Duration;

use crate::error::{CloodError, Result};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where and how to reach the CBR API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Sent verbatim in the `Authorization` header.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `CLOOD_API_URL`, `CLOOD_TOKEN` and `CLOOD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CLOOD_API_URL").map_err(|_| {
            CloodError::Config("CLOOD_API_URL environment variable not set".to_string())
        })?;
        let mut config = Self::new(base_url);

        if let Ok(token) = std::env::var("CLOOD_TOKEN") {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }
        if let Ok(secs) = std::env::var("CLOOD_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                CloodError::Config(format!("CLOOD_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new("http://localhost:3000/dev/");
        assert_eq!(config.base_url, "http://localhost:3000/dev");
        assert_eq!(config.url("/project"), "http://localhost:3000/dev/project");
        assert_eq!(config.url("config"), "http://localhost:3000/dev/config");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://x").with_token("t");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.token.as_deref(), Some("t"));
    }
}
