pub mod txc_types;
pub mod document;
pub mod sections;
pub mod journeys;
pub mod tracks;
pub mod writer;
pub mod uploader;

#[cfg(test)]
mod fixtures;

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::database::types::DataSource;
use crate::error::TxcError;

pub use txc_types::TransXChange;
pub use uploader::{write_to_database, Outcome, UploadSummary};

lazy_static! {
    static ref OBJECT_KEY: Regex = Regex::new(r"^(?P<source>[^/]+)/(?:(?P<region>[^/]+)/)?(?:.*/)?(?P<file>[^/]+)$").unwrap();
}

/// Which tables a document populates. The extended pipeline also writes
/// vehicle journeys, tracks and centre points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Standard,
    Extended,
}

/// Location of a document in the bucket: `<dataSource>/<regionCode>/.../<file>`
/// for TNDS. BODS keys may be nested as well, but never carry a region code.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectKey {
    pub data_source: DataSource,
    pub region_code: Option<String>,
    pub file_name: String,
    pub key: String,
}

impl FromStr for ObjectKey {
    type Err = TxcError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || TxcError::InvalidObjectKey(key.to_string());

        let captures = OBJECT_KEY.captures(key).ok_or_else(invalid)?;
        let data_source: DataSource = captures["source"].parse().map_err(|_| invalid())?;
        let region_code = match data_source {
            DataSource::Tnds => Some(captures.name("region").ok_or_else(invalid)?.as_str().to_string()),
            DataSource::Bods => None,
        };

        Ok(ObjectKey {
            data_source,
            region_code,
            file_name: captures["file"].to_string(),
            key: key.to_string(),
        })
    }
}
