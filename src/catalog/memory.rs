//! In-memory catalog reader.

use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{CatalogError, CatalogResult};
use super::reader::{restrict_to_tables, CatalogReader, InspectOptions};
use super::types::Catalog;

/// A reader that serves a fixed catalog.
///
/// Every call is recorded, which lets callers check which schema name and
/// options were actually requested.
#[derive(Debug)]
pub struct StaticReader {
    outcome: Result<Catalog, String>,
    calls: Mutex<Vec<(String, InspectOptions)>>,
}

impl StaticReader {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            outcome: Ok(catalog),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A reader whose every inspection fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<(String, InspectOptions)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogReader for StaticReader {
    async fn inspect_schema(
        &self,
        schema: &str,
        options: &InspectOptions,
    ) -> CatalogResult<Catalog> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((schema.to_string(), options.clone()));
        }

        match &self.outcome {
            Ok(catalog) => Ok(restrict_to_tables(catalog.clone(), options)),
            Err(message) => Err(CatalogError::Other(message.clone())),
        }
    }
}
