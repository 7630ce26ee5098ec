//! Server configuration from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use tracing::warn;

use crate::bart::BartConfig;
use crate::cache::CacheConfig;
use crate::poll::PollConfig;

/// BART's public demo key. Rate limited and shared.
pub const DEMO_API_KEY: &str = "MW9S-E7SL-26DU-VV8V";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bart: BartConfig,
    pub cache: CacheConfig,
    pub poll: PollConfig,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
}

fn parse<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            var,
            value,
            expected,
        })
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup. Unset or blank variables take
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_key = get("BART_API_KEY").unwrap_or_else(|| {
            warn!("BART_API_KEY not set, using the public demo key");
            DEMO_API_KEY.to_string()
        });

        let mut bart = BartConfig::new(api_key.trim());
        if let Some(url) = get("BART_BASE_URL") {
            bart = bart.with_base_url(url.trim());
        }
        let max_concurrent: Option<usize> = parse(
            "BART_MAX_CONCURRENT",
            get("BART_MAX_CONCURRENT"),
            "a positive integer",
        )?;
        if let Some(n) = max_concurrent {
            if n == 0 {
                return Err(ConfigError::Invalid {
                    var: "BART_MAX_CONCURRENT",
                    value: "0".into(),
                    expected: "a positive integer",
                });
            }
            bart = bart.with_max_concurrent(n);
        }
        let timeout: Option<u64> = parse(
            "BART_TIMEOUT_SECS",
            get("BART_TIMEOUT_SECS"),
            "a number of seconds",
        )?;
        if let Some(secs) = timeout {
            bart = bart.with_timeout(secs);
        }

        let bind_addr: SocketAddr = match parse(
            "BIND_ADDR",
            get("BIND_ADDR"),
            "a socket address like 127.0.0.1:3000",
        )? {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.into(),
                expected: "a socket address",
            })?,
        };

        Ok(Self {
            bart,
            cache: CacheConfig::default(),
            poll: PollConfig::default(),
            bind_addr,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    pub fn uses_demo_key(&self) -> bool {
        self.bart.api_key == DEMO_API_KEY
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::bart::DEFAULT_BASE_URL;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert!(config.uses_demo_key());
        assert_eq!(config.bart.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("BART_API_KEY", "SECRET"),
            ("BART_BASE_URL", "http://localhost:9000/api"),
            ("BART_MAX_CONCURRENT", "2"),
            ("BART_TIMEOUT_SECS", " 5 "),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("STATIC_DIR", "/srv/static"),
        ])
        .unwrap();

        assert!(!config.uses_demo_key());
        assert_eq!(config.bart.api_key, "SECRET");
        assert_eq!(config.bart.base_url, "http://localhost:9000/api");
        assert_eq!(config.bart.max_concurrent, 2);
        assert_eq!(config.bart.timeout_secs, 5);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, "/srv/static");
    }

    #[test]
    fn blank_values_take_defaults() {
        let config = config(&[("BART_API_KEY", "  "), ("BIND_ADDR", "")]).unwrap();
        assert!(config.uses_demo_key());
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = config(&[("BART_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("BART_TIMEOUT_SECS"));

        let err = config(&[("BART_MAX_CONCURRENT", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "BART_MAX_CONCURRENT",
                ..
            }
        ));

        assert!(config(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
