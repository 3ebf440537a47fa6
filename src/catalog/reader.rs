//! CatalogReader trait definition.
//!
//! One implementation exists per supported engine. The inference engine is
//! written once against this trait and never sees connection details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::CatalogResult;
use super::types::Catalog;

/// Options passed through to [`CatalogReader::inspect_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectOptions {
    /// Restrict inspection to these tables. Empty means every table.
    #[serde(default)]
    pub tables: Vec<String>,
}

impl InspectOptions {
    /// Builder: set the table allow-list.
    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a table passes the allow-list.
    pub fn includes(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }
}

/// Reads a schema snapshot from a database.
///
/// # Example
///
/// ```ignore
/// use ermap::catalog::{CatalogReader, InspectOptions, SqliteReader};
///
/// let reader = SqliteReader::open("./app.db")?;
/// let catalog = reader.inspect_schema("main", &InspectOptions::default()).await?;
/// ```
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Inspect every table of `schema` that passes `options`.
    async fn inspect_schema(&self, schema: &str, options: &InspectOptions)
        -> CatalogResult<Catalog>;
}

#[async_trait]
impl<T: CatalogReader + ?Sized> CatalogReader for Box<T> {
    async fn inspect_schema(
        &self,
        schema: &str,
        options: &InspectOptions,
    ) -> CatalogResult<Catalog> {
        (**self).inspect_schema(schema, options).await
    }
}

/// Drop tables that are not on the allow-list, keeping catalog order.
pub fn restrict_to_tables(mut catalog: Catalog, options: &InspectOptions) -> Catalog {
    if !options.tables.is_empty() {
        catalog.tables.retain(|t| options.includes(&t.name));
    }
    catalog
}
