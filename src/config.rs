use std::{env, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_TABLE_SUFFIX: &str = "_new";
const DEFAULT_METRICS_NAMESPACE: &str = "ReferenceDataService/Uploaders";
const DEFAULT_DB_CHECK_ATTEMPTS: u32 = 20;
const DEFAULT_DB_CHECK_DELAY_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` through dotenv).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,

    /// Suffix of the writer tables, the "being rebuilt" copies that an
    /// external job swaps in after a full reload. Empty writes to live tables.
    pub table_suffix: String,

    pub metrics_namespace: String,
    pub db_check_attempts: u32,
    pub db_check_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        fn parsed<T: FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            name: &'static str,
            default: T,
        ) -> Result<T, ConfigError> {
            match lookup(name) {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
                None => Ok(default),
            }
        }

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Config {
            database_url,
            table_suffix: lookup("TABLE_SUFFIX").unwrap_or_else(|| DEFAULT_TABLE_SUFFIX.to_string()),
            metrics_namespace: lookup("METRICS_NAMESPACE").unwrap_or_else(|| DEFAULT_METRICS_NAMESPACE.to_string()),
            db_check_attempts: parsed(&lookup, "DB_CHECK_ATTEMPTS", DEFAULT_DB_CHECK_ATTEMPTS)?,
            db_check_delay: Duration::from_secs(parsed(&lookup, "DB_CHECK_DELAY_SECS", DEFAULT_DB_CHECK_DELAY_SECS)?),
        })
    }
}
