//! Configuration management for the contact pruner.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honoured if present.

use crate::error::{ConfigError, ConfigResult};
use crate::resilience::RetryPolicy;
use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

/// Default People API endpoint.
pub const DEFAULT_API_URL: &str = "https://people.googleapis.com/v1";

/// Default pacing budget.
pub const DEFAULT_MAX_CALLS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(90) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// Configuration for the contact pruner.
#[derive(Debug, Clone)]
pub struct Config {
    /// People API base URL
    pub api_url: String,

    /// OAuth bearer access token with the contacts scope. Only required for
    /// runs that reach the API.
    pub access_token: Option<String>,

    /// Maximum remote calls per minute (default: 90)
    pub max_calls_per_minute: NonZeroU32,

    /// Retries after the first attempt for transient failures (default: 5)
    pub max_retries: u32,

    /// Delay before the first retry in seconds (default: 2)
    pub base_backoff_seconds: u64,

    /// Growth factor applied to the delay on each further retry (default: 2)
    pub backoff_multiplier: u32,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PEOPLE_API_ACCESS_TOKEN`: bearer token for the People API; checked
    ///   by [`Config::require_access_token`] when a client is built
    /// - `PEOPLE_API_BASE_URL`: API base URL (default: `https://people.googleapis.com/v1`)
    /// - `MAX_CALLS_PER_MINUTE`: pacing budget (default: 90)
    /// - `MAX_RETRIES`: retries for transient failures (default: 5)
    /// - `BASE_BACKOFF_SECONDS`: first retry delay (default: 2)
    /// - `BACKOFF_MULTIPLIER`: backoff growth factor (default: 2)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let access_token = env::var("PEOPLE_API_ACCESS_TOKEN").ok();

        if access_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                var: "PEOPLE_API_ACCESS_TOKEN".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let api_url =
            env::var("PEOPLE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "PEOPLE_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let max_calls_per_minute =
            Self::parse_env_u32("MAX_CALLS_PER_MINUTE", DEFAULT_MAX_CALLS_PER_MINUTE.get())?;
        let max_calls_per_minute =
            NonZeroU32::new(max_calls_per_minute).ok_or_else(|| ConfigError::InvalidValue {
                var: "MAX_CALLS_PER_MINUTE".to_string(),
                reason: "Must be greater than zero".to_string(),
            })?;

        let max_retries = Self::parse_env_u32("MAX_RETRIES", 5)?;
        let base_backoff_seconds = Self::parse_env_u64("BASE_BACKOFF_SECONDS", 2)?;

        let backoff_multiplier = Self::parse_env_u32("BACKOFF_MULTIPLIER", 2)?;
        if backoff_multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                var: "BACKOFF_MULTIPLIER".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_url,
            access_token,
            max_calls_per_minute,
            max_retries,
            base_backoff_seconds,
            backoff_multiplier,
            request_timeout,
            log_level,
        })
    }

    /// The access token, for code paths that call the API.
    pub fn require_access_token(&self) -> ConfigResult<&str> {
        self.access_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("PEOPLE_API_ACCESS_TOKEN".to_string()))
    }

    /// Retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_secs(self.base_backoff_seconds),
            multiplier: self.backoff_multiplier,
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            max_calls_per_minute: DEFAULT_MAX_CALLS_PER_MINUTE,
            max_retries: 5,
            base_backoff_seconds: 2,
            backoff_multiplier: 2,
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ALL_VARS: &[&str] = &[
        "PEOPLE_API_ACCESS_TOKEN",
        "PEOPLE_API_BASE_URL",
        "MAX_CALLS_PER_MINUTE",
        "MAX_RETRIES",
        "BASE_BACKOFF_SECONDS",
        "BACKOFF_MULTIPLIER",
        "REQUEST_TIMEOUT",
    ];

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            for var in ALL_VARS {
                env::remove_var(var);
            }
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_calls_per_minute.get(), 90);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_backoff_seconds, 2);
        assert_eq!(config.backoff_multiplier, 2);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = Config::default();
        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay, Duration::from_secs(2));
        assert_eq!(policy.multiplier, 2);
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("PEOPLE_API_ACCESS_TOKEN", "ya29.token");
        guard.set("MAX_CALLS_PER_MINUTE", "60");
        guard.set("MAX_RETRIES", "3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.require_access_token().unwrap(), "ya29.token");
        assert_eq!(config.max_calls_per_minute.get(), 60);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_backoff_seconds, 2);
    }

    #[test]
    #[serial]
    fn test_config_from_env_without_token() {
        let _guard = EnvGuard::new();

        let config = Config::from_env().unwrap();
        assert!(config.access_token.is_none());
        assert_eq!(config.max_calls_per_minute.get(), 90);

        match config.require_access_token() {
            Err(ConfigError::MissingVar(var)) => assert_eq!(var, "PEOPLE_API_ACCESS_TOKEN"),
            other => panic!("Expected MissingVar error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_token() {
        let mut guard = EnvGuard::new();
        guard.set("PEOPLE_API_ACCESS_TOKEN", "   ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "PEOPLE_API_ACCESS_TOKEN")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("PEOPLE_API_ACCESS_TOKEN", "token");
        guard.set("PEOPLE_API_BASE_URL", "not-a-url");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PEOPLE_API_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_rate() {
        let mut guard = EnvGuard::new();
        guard.set("PEOPLE_API_ACCESS_TOKEN", "token");
        guard.set("MAX_CALLS_PER_MINUTE", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MAX_CALLS_PER_MINUTE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u32_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U32_INVALID", "not-a-number");

        let result = Config::parse_env_u32("TEST_U32_INVALID", 10);
        assert!(result.is_err());

        let result = Config::parse_env_u32("NONEXISTENT_U32", 10);
        assert_eq!(result.unwrap(), 10);
    }
}
