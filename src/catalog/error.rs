//! Catalog reader error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while reading a catalog.
///
/// Inference never inspects these; they are handed back to the caller as-is.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// SQLite query failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to read a snapshot file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot file is not a valid catalog.
    #[error("malformed catalog snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested schema does not exist.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// No reader is available for this driver.
    #[error("no catalog reader for driver: {0}")]
    UnsupportedDriver(String),

    /// Any other reader failure.
    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
