//! # Configuration
//!
//! Command-line flags with environment fallbacks, parsed by `clap`.
//! The datastore URL and database name are required unless `--memory` is
//! given; a missing value stops the process before anything binds.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

/// Portfolio backend API server.
#[derive(Parser, Debug, Clone)]
#[command(name = "folio-api", version, about)]
pub struct Cli {
    /// MongoDB connection string.
    #[arg(long, env = "MONGO_URL", hide_env_values = true)]
    pub mongo_url: Option<String>,

    /// Database holding the portfolio collections.
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 8001)]
    pub port: u16,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Seconds to wait for the datastore when connecting.
    #[arg(long, env = "MONGO_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Keep records in process memory instead of MongoDB. Overrides
    /// `--mongo-url` and `--db-name`.
    #[arg(long)]
    pub memory: bool,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Which [`crate::db::DocumentStore`] to open.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB at `url`, database `db_name`.
    Mongo {
        /// Connection string (may carry credentials).
        url: String,
        /// Database name.
        db_name: String,
    },
    /// [`crate::db::memory::MemoryStore`].
    Memory,
}

impl std::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mongo { url, db_name } => f
                .debug_struct("Mongo")
                .field("url", &redact_url(url))
                .field("db_name", db_name)
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Datastore selection.
    pub backend: StoreBackend,
    /// Socket to bind.
    pub bind: SocketAddr,
    /// Log line format.
    pub log_format: LogFormat,
    /// Datastore connect and server-selection timeout.
    pub connect_timeout: Duration,
}

/// A required setting is absent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No datastore URL given.
    #[error("MONGO_URL is not set (pass --mongo-url, or --memory for an in-process store)")]
    MissingMongoUrl,
    /// No database name given.
    #[error("DB_NAME is not set (pass --db-name)")]
    MissingDbName,
}

impl Cli {
    /// Validate flag combinations and build an [`AppConfig`].
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let backend = if self.memory {
            StoreBackend::Memory
        } else {
            let url = non_empty(self.mongo_url).ok_or(ConfigError::MissingMongoUrl)?;
            let db_name = non_empty(self.db_name).ok_or(ConfigError::MissingDbName)?;
            StoreBackend::Mongo { url, db_name }
        };
        Ok(AppConfig {
            backend,
            bind: SocketAddr::new(self.host, self.port),
            log_format: self.log_format,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Hide the userinfo part of a connection string.
fn redact_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://[REDACTED]@{host}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
