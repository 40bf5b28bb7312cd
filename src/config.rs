use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::week::Locale;

pub const HTTP_ADDR_VAR: &str = "CAPACITY_PLANNER_HTTP_ADDR";
pub const SNAPSHOT_VAR: &str = "CAPACITY_PLANNER_SNAPSHOT";
pub const LOCALE_VAR: &str = "CAPACITY_PLANNER_LOCALE";
pub const LOG_VAR: &str = "CAPACITY_PLANNER_LOG";

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str = "capacity_planner=info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: '{value}'")]
    InvalidAddr { var: &'static str, value: String },
    #[error("{var} names an unsupported locale '{value}' (expected en or sv)")]
    InvalidLocale { var: &'static str, value: String },
}

/// Settings for the CLI and HTTP binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub http_addr: SocketAddr,
    /// Snapshot to load at startup.
    pub snapshot_path: Option<PathBuf>,
    pub locale: Locale,
    pub log_filter: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source, so tests need not touch the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup(HTTP_ADDR_VAR).unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = addr.trim().parse().map_err(|_| ConfigError::InvalidAddr {
            var: HTTP_ADDR_VAR,
            value: addr.clone(),
        })?;

        let snapshot_path = lookup(SNAPSHOT_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let locale = match lookup(LOCALE_VAR) {
            Some(code) => Locale::from_code(&code).ok_or(ConfigError::InvalidLocale {
                var: LOCALE_VAR,
                value: code.clone(),
            })?,
            None => Locale::default(),
        };

        let log_filter = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            http_addr,
            snapshot_path,
            locale,
            log_filter,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            snapshot_path: None,
            locale: Locale::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
