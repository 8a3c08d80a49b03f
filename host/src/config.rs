//! Host configuration read from the environment, with logged defaults.

use std::{env, time::Duration};

use thiserror::Error;
use tracing::info;

pub const BACKEND_URL_VAR: &str = "CAFE_BACKEND_URL";
pub const TIMEOUT_VAR: &str = "CAFE_REQUEST_TIMEOUT_SECS";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = lookup(BACKEND_URL_VAR).unwrap_or_else(|| {
            info!("{BACKEND_URL_VAR} not set, using default: {DEFAULT_BACKEND_URL}");
            DEFAULT_BACKEND_URL.to_string()
        });
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: BACKEND_URL_VAR,
                value: backend_url,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: TIMEOUT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => {
                info!("{TIMEOUT_VAR} not set, using default: {DEFAULT_TIMEOUT_SECS}");
                DEFAULT_TIMEOUT_SECS
            }
        };

        Ok(Self {
            backend_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend_url, "http://127.0.0.1:3000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "https://fika.example"),
            (TIMEOUT_VAR, " 3 "),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://fika.example");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Config::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "fika.example")])).unwrap_err();
        assert!(err.to_string().contains(BACKEND_URL_VAR));
    }
}
