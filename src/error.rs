use thiserror::Error;

use crate::database::StoreError;

/// Errors that abort the processing of a whole document. Anything returned as
/// a `TxcError` has already caused the document's transaction to be rolled back.
#[derive(Debug, Error)]
pub enum TxcError {
    #[error("could not parse TransXChange document: {0}")]
    Parse(#[from] quick_xml::DeError),

    #[error("invalid object key '{0}', expected <tnds|bods>/<region?>/<file>.xml")]
    InvalidObjectKey(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
