//! Rewards API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use rewards_store::StoreConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 9018;

/// Rewards API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,

    /// Listen port
    pub port: u16,

    /// Store lifetimes and limits
    pub store: StoreConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            store: StoreConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit key/value map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let bind_addr = lookup("REWARDS_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let port = parse_var(&lookup, "REWARDS_PORT")?.unwrap_or(defaults.port);

        let receipt_ttl = parse_secs(&lookup, "REWARDS_RECEIPT_TTL_SECS")?
            .unwrap_or(defaults.store.receipt_ttl);

        // Unset means markers never expire
        let marker_ttl = parse_secs(&lookup, "REWARDS_MARKER_TTL_SECS")?;

        let sweep_interval = parse_secs(&lookup, "REWARDS_SWEEP_INTERVAL_SECS")?
            .unwrap_or(defaults.store.sweep_interval);

        let max_id_attempts = parse_var(&lookup, "REWARDS_MAX_ID_ATTEMPTS")?
            .unwrap_or(defaults.store.max_id_attempts);

        let store = StoreConfig::new()
            .receipt_ttl(receipt_ttl)
            .marker_ttl(marker_ttl)
            .sweep_interval(sweep_interval)
            .max_id_attempts(max_id_attempts);

        store
            .validate()
            .map_err(|e| ConfigError::InvalidStore(e.to_string()))?;

        Ok(ApiConfig {
            bind_addr,
            port,
            store,
        })
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(None),
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_var::<F, u64>(lookup, key)?.map(Duration::from_secs))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("{0}")]
    InvalidStore(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_map(&HashMap::new()).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:9018");
        assert_eq!(config.store.receipt_ttl, Duration::from_secs(43_200));
        assert_eq!(config.store.marker_ttl, None);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_map(&vars(&[
            ("REWARDS_BIND_ADDR", "127.0.0.1"),
            ("REWARDS_PORT", "8080"),
            ("REWARDS_RECEIPT_TTL_SECS", "60"),
            ("REWARDS_MARKER_TTL_SECS", "120"),
            ("REWARDS_SWEEP_INTERVAL_SECS", "5"),
            ("REWARDS_MAX_ID_ATTEMPTS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.store.receipt_ttl, Duration::from_secs(60));
        assert_eq!(config.store.marker_ttl, Some(Duration::from_secs(120)));
        assert_eq!(config.store.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.store.max_id_attempts, 3);
    }

    #[test]
    fn test_unparsable_value() {
        let err = ApiConfig::from_map(&vars(&[("REWARDS_PORT", "ninety")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for REWARDS_PORT");

        let err = ApiConfig::from_map(&vars(&[("REWARDS_RECEIPT_TTL_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        for key in [
            "REWARDS_RECEIPT_TTL_SECS",
            "REWARDS_MARKER_TTL_SECS",
            "REWARDS_SWEEP_INTERVAL_SECS",
            "REWARDS_MAX_ID_ATTEMPTS",
        ] {
            let err = ApiConfig::from_map(&vars(&[(key, "0")])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidStore(_)), "{key}");
        }
    }
}
