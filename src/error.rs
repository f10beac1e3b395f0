use std::path::PathBuf;

use thiserror::Error;

/// Failures at the crate's edges. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("document not found: {memory}/{document}")]
    DocumentNotFound { memory: String, document: String },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
