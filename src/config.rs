//! Centralized configuration management for formdash

use anyhow::Result;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the form service (API and dashboard share a host)
    pub api_base_url: String,
    /// Session token sent as a bearer credential; absent means signed out
    pub api_token: Option<String>,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "formdash/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("FORMDASH_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let api_token = std::env::var("FORMDASH_API_TOKEN").ok();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("FORMDASH_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("FORMDASH_USER_AGENT")
                .unwrap_or_else(|_| "formdash/0.1.0".to_string()),
        };

        Ok(Config {
            api_base_url,
            api_token,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "FORMDASH_API_URL must be an http(s) URL, got: {}",
                self.api_base_url
            ));
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    use anyhow::Context;
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: None,
            http: HttpConfig::default(),
        };
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.user_agent, "formdash/0.1.0");
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            api_token: None,
            http: HttpConfig::default(),
        };
        assert!(config.validate().is_err());
    }
}
