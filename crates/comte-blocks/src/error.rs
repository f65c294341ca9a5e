use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog invalid: {detail}")]
    Invalid { detail: String },
    #[error("catalog manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog manifest parse: {0}")]
    Json(#[from] serde_json::Error),
}
