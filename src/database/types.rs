use std::{fmt, str::FromStr};

use diesel_derive_enum::DbEnum;

/// Origin of a TransXChange file, stored in the `dataSource` enum column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DbEnum)]
#[DieselType = "Data_source"]
pub enum DataSource {
    Tnds,
    Bods,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Tnds => "tnds",
            DataSource::Bods => "bods",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tnds" => Ok(DataSource::Tnds),
            "bods" => Ok(DataSource::Bods),
            other => Err(format!("unknown data source '{}'", other)),
        }
    }
}
