use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("Data directory not found")]
    NoDataDirectory,
}
