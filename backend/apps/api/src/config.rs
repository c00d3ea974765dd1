//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use platform::config::StoreConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_DOCUMENT_SUFFIX: &str = ".json";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Firebase-style REST API
    Rest,
    /// Process-local tree, lost on restart
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected rest or memory)")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => f.write_str("rest"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub store_backend: StoreBackend,
    /// Only set for the REST backend
    pub store: Option<StoreConfig>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = try_load(&lookup, "LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?;
        let frontend_origins = try_load::<String, _>(&lookup, "FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)?
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();
        let store_backend = try_load(&lookup, "STORE_BACKEND", "rest")?;

        let store = match store_backend {
            StoreBackend::Memory => None,
            StoreBackend::Rest => {
                let Some(base_url) = lookup("STORE_BASE_URL") else {
                    bail!("STORE_BASE_URL must be set when STORE_BACKEND=rest");
                };
                let timeout_secs: u64 =
                    try_load(&lookup, "STORE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
                Some(StoreConfig {
                    base_url,
                    document_suffix: try_load(
                        &lookup,
                        "STORE_DOCUMENT_SUFFIX",
                        DEFAULT_DOCUMENT_SUFFIX,
                    )?,
                    request_timeout: Duration::from_secs(timeout_secs),
                })
            }
        };

        Ok(Self {
            listen_addr,
            frontend_origins,
            store_backend,
            store,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_memory_backend_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory")])).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:31113".parse::<SocketAddr>().unwrap());
        assert_eq!(
            config.frontend_origins,
            vec!["http://localhost:40922", "http://127.0.0.1:40922"]
        );
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.store.is_none());
    }

    #[test]
    fn test_rest_backend_requires_base_url() {
        assert!(ApiConfig::from_lookup(lookup(&[])).is_err());
    }

    #[test]
    fn test_rest_backend_reads_store_settings() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("STORE_BASE_URL", "https://demo.firebaseio.com/"),
            ("STORE_TIMEOUT_SECS", "3"),
            ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
        ]))
        .unwrap();

        let store = config.store.unwrap();
        assert_eq!(store.base_url, "https://demo.firebaseio.com/");
        assert_eq!(store.document_suffix, ".json");
        assert_eq!(store.request_timeout, Duration::from_secs(3));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(
            ApiConfig::from_lookup(lookup(&[("STORE_BACKEND", "postgres")])).is_err()
        );
        assert!(
            ApiConfig::from_lookup(lookup(&[
                ("STORE_BACKEND", "memory"),
                ("LISTEN_ADDR", "not-an-addr"),
            ]))
            .is_err()
        );
    }
}
