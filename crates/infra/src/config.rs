//! Configuration loading and representation.
//!
//! Settings come from environment variables, each with a default suitable for
//! running on a local network:
//!
//! | variable               | default         |
//! |------------------------|-----------------|
//! | `SCANSTOCK_BIND`       | `0.0.0.0:3000`  |
//! | `SCANSTOCK_DATA_FILE`  | `products.csv`  |
//! | `SCANSTOCK_LOG_FORMAT` | `json`          |

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use scanstock_observability::LogFormat;

pub const BIND_VAR: &str = "SCANSTOCK_BIND";
pub const DATA_FILE_VAR: &str = "SCANSTOCK_DATA_FILE";
pub const LOG_FORMAT_VAR: &str = "SCANSTOCK_LOG_FORMAT";

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_FILE: &str = "products.csv";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match get(BIND_VAR) {
            Some(v) => v.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                var: BIND_VAR,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => default_bind(),
        };

        let data_file = get(DATA_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let log_format = match get(LOG_FORMAT_VAR) {
            Some(v) => v.parse::<LogFormat>().map_err(|e| {
                ConfigError::Invalid {
                    var: LOG_FORMAT_VAR,
                    value: v.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            data_file,
            log_format,
        })
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_format: LogFormat::default(),
        }
    }
}
