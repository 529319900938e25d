//! Data-layer configuration from `BRANDHUB_*` environment variables.

use std::path::PathBuf;

use thiserror::Error;

use crate::repository::{CorruptionPolicy, Latency, RepositoryOptions};

pub const DEFAULT_DATA_DIR: &str = ".brandhub";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://brandhub.db?mode=rwc";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has unsupported value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Where collections are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
    Sqlite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub backend: StoreBackend,
    pub latency: Latency,
    pub on_corrupt: CorruptionPolicy,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File(PathBuf::from(DEFAULT_DATA_DIR)),
            latency: Latency::DEFAULT,
            on_corrupt: CorruptionPolicy::Reseed,
        }
    }
}

impl DataConfig {
    /// In-memory backend, no latency.
    pub fn ephemeral() -> Self {
        Self {
            backend: StoreBackend::Memory,
            latency: Latency::none(),
            on_corrupt: CorruptionPolicy::Reseed,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from a variable lookup; unset variables take their defaults.
    ///
    /// - `BRANDHUB_STORE`: `memory`, `file` (default) or `sqlite`
    /// - `BRANDHUB_DATA_DIR`: file backend directory
    /// - `BRANDHUB_SQLITE_URL`: sqlite backend URL
    /// - `BRANDHUB_LATENCY_MS`: per-call delay, default 500
    /// - `BRANDHUB_ON_CORRUPT`: `reseed` (default) or `fail`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("BRANDHUB_STORE").as_deref() {
            None | Some("file") => StoreBackend::File(
                get("BRANDHUB_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ),
            Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite(
                get("BRANDHUB_SQLITE_URL").unwrap_or_else(|| DEFAULT_SQLITE_URL.to_string()),
            ),
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "BRANDHUB_STORE",
                    value: other.to_string(),
                });
            }
        };

        let latency = match get("BRANDHUB_LATENCY_MS") {
            None => Latency::DEFAULT,
            Some(raw) => raw
                .parse::<u64>()
                .map(Latency::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    var: "BRANDHUB_LATENCY_MS",
                    value: raw.clone(),
                })?,
        };

        let on_corrupt = match get("BRANDHUB_ON_CORRUPT").as_deref() {
            None | Some("reseed") => CorruptionPolicy::Reseed,
            Some("fail") => CorruptionPolicy::Fail,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "BRANDHUB_ON_CORRUPT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            backend,
            latency,
            on_corrupt,
        })
    }

    pub fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions {
            latency: self.latency,
            on_corrupt: self.on_corrupt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = DataConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DataConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = DataConfig::from_lookup(lookup(&[
            ("BRANDHUB_STORE", "sqlite"),
            ("BRANDHUB_SQLITE_URL", "sqlite::memory:"),
            ("BRANDHUB_LATENCY_MS", "0"),
            ("BRANDHUB_ON_CORRUPT", "fail"),
        ]))
        .unwrap();
        assert_eq!(config.backend, StoreBackend::Sqlite("sqlite::memory:".into()));
        assert_eq!(config.latency, Latency::none());
        assert_eq!(config.on_corrupt, CorruptionPolicy::Fail);

        let config = DataConfig::from_lookup(lookup(&[("BRANDHUB_DATA_DIR", "/tmp/bh")])).unwrap();
        assert_eq!(config.backend, StoreBackend::File("/tmp/bh".into()));
    }

    #[test]
    fn rejects_unknown_values() {
        let err = DataConfig::from_lookup(lookup(&[("BRANDHUB_STORE", "redis")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "BRANDHUB_STORE",
                value: "redis".into()
            }
        );
        assert!(DataConfig::from_lookup(lookup(&[("BRANDHUB_LATENCY_MS", "soon")])).is_err());
    }
}
