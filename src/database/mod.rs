pub mod schema;
pub mod types;
pub mod store;
pub mod mysql;

use std::thread;

use diesel::prelude::*;
use diesel::mysql::MysqlConnection;
use log::info;
use thiserror::Error;

use crate::config::Config;

pub use store::ReferenceStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The line's operator code is not present in the `operators` table.
    #[error("NOC '{noc}' not found in operators")]
    InvalidNoc { noc: String },

    /// The database is (temporarily) not reachable.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Query(#[from] diesel::result::Error),

    #[error(transparent)]
    Connection(#[from] diesel::result::ConnectionError),
}

const TRANSIENT_MARKERS: &[&str] = &[
    "Communications link failure",
    "Can't connect to MySQL server",
    "Lost connection to MySQL server",
    "MySQL server has gone away",
];

fn is_transient(message: &str) -> bool {
    TRANSIENT_MARKERS.iter().any(|marker| message.contains(marker))
}

impl StoreError {
    fn classify_connection(err: diesel::result::ConnectionError) -> Self {
        match err {
            diesel::result::ConnectionError::BadConnection(ref message) if is_transient(message) => {
                StoreError::Unavailable(message.clone())
            }
            other => StoreError::Connection(other),
        }
    }

    fn classify_query(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(_, ref info) if is_transient(info.message()) => {
                StoreError::Unavailable(info.message().to_string())
            }
            other => StoreError::Query(other),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

pub fn establish_connection(database_url: &str) -> Result<MysqlConnection, StoreError> {
    let connection = MysqlConnection::establish(database_url).map_err(StoreError::classify_connection)?;
    diesel::sql_query("SELECT 1").execute(&connection).map_err(StoreError::classify_query)?;
    Ok(connection)
}

/// Pre-flight check: keeps trying to reach the database while it reports
/// itself as unavailable (e.g. a paused serverless cluster waking up). Any
/// other failure, or running out of attempts, is returned immediately.
pub fn wait_for_database(config: &Config) -> Result<MysqlConnection, StoreError> {
    retry_while_unavailable(config.db_check_attempts, config.db_check_delay, || {
        establish_connection(&config.database_url)
    })
}

fn retry_while_unavailable<T>(
    attempts: u32,
    delay: std::time::Duration,
    mut check: impl FnMut() -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    info!("Checking if database is available");

    let mut attempt = 1;
    loop {
        match check() {
            Ok(value) => {
                info!("Database available");
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempt < attempts => {
                info!("Database stopped, waiting for {} seconds before retrying ({}/{})", delay.as_secs(), attempt, attempts);
                thread::sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
