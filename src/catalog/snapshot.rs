//! JSON snapshot catalog reader.
//!
//! A snapshot is a [`Catalog`] serialized with `serde_json`, typically
//! produced by `ermap inspect`. It lets inference run without a live
//! database connection.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;

use super::error::{CatalogError, CatalogResult};
use super::reader::{restrict_to_tables, CatalogReader, InspectOptions};
use super::types::Catalog;

/// Reads a catalog from a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    path: PathBuf,
}

impl SnapshotReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and parse the snapshot.
    pub fn load(&self) -> CatalogResult<Catalog> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| CatalogError::io(&self.path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl CatalogReader for SnapshotReader {
    async fn inspect_schema(
        &self,
        schema: &str,
        options: &InspectOptions,
    ) -> CatalogResult<Catalog> {
        let catalog = self.load()?;

        // An empty name on either side matches anything.
        if !schema.is_empty() && !catalog.name.is_empty() && catalog.name != schema {
            return Err(CatalogError::SchemaNotFound(schema.to_string()));
        }

        tracing::debug!(
            path = %self.path.display(),
            tables = catalog.tables.len(),
            "loaded catalog snapshot"
        );
        Ok(restrict_to_tables(catalog, options))
    }
}

/// Render a catalog as pretty-printed snapshot JSON.
pub fn to_snapshot_json(catalog: &Catalog) -> CatalogResult<String> {
    Ok(serde_json::to_string_pretty(catalog)?)
}
