//! Process configuration read from the environment.
//!
//! [`AppConfig::from_env`] reads the process environment (after `.env` has
//! been loaded by the binary). Parsing itself is [`AppConfig::from_lookup`],
//! a pure function over a key lookup.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `STORAGE_MODE` | `postgres` (`postgres` or `in_memory`) |
//! | `DATABASE_URL` | built from `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_NAME` |
//! | `DB_POOL_SIZE` | `10` |
//! | `RUN_MIGRATIONS` | `true` |
//! | `PROFILE_API_URL` | `http://localhost:8081/info` |
//! | `OPERATION_TIMEOUT_MS` | `2000` |
//! | `TASK_DESCRIPTION_UNIQUENESS` | `while_open` (`while_open` or `disabled`) |
//! | `LOG_FORMAT` | `json` (`json` or `pretty`) |
//! | `LOG_LEVEL` | `info`; `DEBUG=true` forces `debug` |

use crate::task::domain::{DescriptionUniqueness, ParseDescriptionUniquenessError};
use std::{str::FromStr, time::Duration};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_PROFILE_API_URL: &str = "http://localhost:8081/info";
const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 2000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `STORAGE_MODE` is not a known backend.
    #[error("invalid STORAGE_MODE '{0}', expected postgres or in_memory")]
    InvalidStorageMode(String),

    /// `LOG_FORMAT` is not a known format.
    #[error("invalid LOG_FORMAT '{0}', expected json or pretty")]
    InvalidLogFormat(String),

    /// A numeric variable could not be parsed.
    #[error("invalid {key} '{value}', expected a positive integer")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// A boolean variable could not be parsed.
    #[error("invalid {key} '{value}', expected true or false")]
    InvalidBool {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// `TASK_DESCRIPTION_UNIQUENESS` is not a known policy.
    #[error(transparent)]
    InvalidUniqueness(#[from] ParseDescriptionUniquenessError),

    /// `PostgreSQL` storage was selected without connection settings.
    #[error("STORAGE_MODE=postgres requires DATABASE_URL or POSTGRES_HOST")]
    MissingDatabaseUrl,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// Diesel-backed `PostgreSQL` storage.
    #[default]
    Postgres,
    /// Process-local storage for development and tests.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(value.to_owned())),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Default filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL, when configured.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: u32,
    /// Whether to apply the schema at startup.
    pub run_migrations: bool,
    /// Identity profile lookup endpoint.
    pub profile_api_url: String,
    /// Deadline for each store call and profile lookup.
    pub operation_timeout: Duration,
    /// Duplicate open-task description policy.
    pub description_uniqueness: DescriptionUniqueness,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value or
    /// `PostgreSQL` storage lacks connection settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value or
    /// `PostgreSQL` storage lacks connection settings.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let storage_mode = read("STORAGE_MODE")
            .map(|raw| raw.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let database_url = read("DATABASE_URL").or_else(|| compose_database_url(&read));
        if storage_mode == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let port = parse_number(read("PORT"), "PORT", DEFAULT_PORT)?;
        let db_pool_size = parse_number(read("DB_POOL_SIZE"), "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        let timeout_ms = parse_number(
            read("OPERATION_TIMEOUT_MS"),
            "OPERATION_TIMEOUT_MS",
            DEFAULT_OPERATION_TIMEOUT_MS,
        )?;
        let run_migrations = parse_bool(read("RUN_MIGRATIONS"), "RUN_MIGRATIONS", true)?;
        let debug = parse_bool(read("DEBUG"), "DEBUG", false)?;

        let description_uniqueness = read("TASK_DESCRIPTION_UNIQUENESS")
            .map(|raw| DescriptionUniqueness::try_from(raw.as_str()))
            .transpose()?
            .unwrap_or_default();

        let format = read("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();
        let level = if debug {
            "debug".to_owned()
        } else {
            read("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
        };

        Ok(Self {
            host: read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            storage_mode,
            database_url,
            db_pool_size,
            run_migrations,
            profile_api_url: read("PROFILE_API_URL")
                .unwrap_or_else(|| DEFAULT_PROFILE_API_URL.to_owned()),
            operation_timeout: Duration::from_millis(timeout_ms),
            description_uniqueness,
            logging: LoggingConfig { format, level },
        })
    }

    /// Returns the `host:port` listen address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn compose_database_url(read: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let host = read("POSTGRES_HOST")?;
    let port = read("POSTGRES_PORT").unwrap_or_else(|| "5432".to_owned());
    let user = read("POSTGRES_USER").unwrap_or_else(|| "postgres".to_owned());
    let name = read("POSTGRES_NAME").unwrap_or_else(|| "postgres".to_owned());
    let credentials = read("POSTGRES_PASSWORD")
        .map_or_else(|| user.clone(), |password| format!("{user}:{password}"));
    Some(format!("postgres://{credentials}@{host}:{port}/{name}"))
}

fn parse_number<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn parse_bool(value: Option<String>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: raw }),
    }
}
