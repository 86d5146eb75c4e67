//! Runtime configuration, read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DISASTER_WATCH_PORT` | `3000` |
//! | `DISASTER_WATCH_REQUEST_TIMEOUT_SECS` | `30` |
//! | `DISASTER_WATCH_GDACS_URL` | GDACS production API |
//! | `DISASTER_WATCH_EONET_URL` | EONET v3 production API |
//! | `DISASTER_WATCH_USGS_URL` | USGS FDSN production API |
//!
//! Unparseable values fall back to their defaults.

use std::env;
use std::time::Duration;

use crate::aggregation::AggregatorConfig;
use crate::data_sources::DEFAULT_REQUEST_TIMEOUT;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub aggregator: AggregatorConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("DISASTER_WATCH_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let request_timeout = lookup("DISASTER_WATCH_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let url = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port,
            aggregator: AggregatorConfig {
                gdacs_url: url("DISASTER_WATCH_GDACS_URL"),
                eonet_url: url("DISASTER_WATCH_EONET_URL"),
                usgs_url: url("DISASTER_WATCH_USGS_URL"),
                request_timeout: Some(request_timeout),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.aggregator.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
        assert!(config.aggregator.gdacs_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DISASTER_WATCH_PORT", "8080"),
            ("DISASTER_WATCH_REQUEST_TIMEOUT_SECS", "5"),
            ("DISASTER_WATCH_USGS_URL", "http://localhost:9000/fdsn"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.aggregator.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(
            config.aggregator.usgs_url.as_deref(),
            Some("http://localhost:9000/fdsn")
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("DISASTER_WATCH_PORT", "not-a-port"),
            ("DISASTER_WATCH_REQUEST_TIMEOUT_SECS", "0"),
            ("DISASTER_WATCH_EONET_URL", "  "),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.aggregator.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
        assert!(config.aggregator.eonet_url.is_none());
    }
}
