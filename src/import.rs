//! Import entry point.
//!
//! [`Importer`] ties a [`CatalogReader`] to an explicit [`ImportOptions`]
//! value: it resolves the schema name, asks the reader for one catalog
//! snapshot and runs inference over it.
//!
//! # Example
//!
//! ```ignore
//! use ermap::import::{open_reader, ImportOptions, Importer};
//!
//! let options = ImportOptions::default().with_dsn("sqlite://./app.db");
//! let importer = Importer::new(open_reader(&options)?, options);
//! let mutations = importer.schema_mutations().await?;
//! ```

use std::path::PathBuf;

use crate::catalog::{
    Catalog, CatalogError, CatalogReader, InspectOptions, SnapshotReader, SqliteReader,
};
use crate::config::{ConnectionError, Driver, Dsn, ImportSettings, SettingsError};
use crate::inference::{infer, InferenceError};
use crate::model::SchemaMutations;

/// Result type for imports.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type for imports.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Nothing to import: set a DSN or a catalog snapshot")]
    MissingSource,
}

/// Everything one import run needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Connection string of the database to inspect.
    pub dsn: Option<String>,
    /// Explicit schema name. Wins over anything derived from the DSN.
    pub schema: Option<String>,
    /// Table allow-list. Empty means every table.
    pub tables: Vec<String>,
    /// Read the catalog from a JSON snapshot instead of the DSN.
    pub snapshot: Option<PathBuf>,
}

impl ImportOptions {
    /// Build options from the `[import]` section of a config file.
    pub fn from_settings(settings: &ImportSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            dsn: settings.resolved_dsn()?,
            schema: settings.schema.clone(),
            tables: settings.tables.clone(),
            snapshot: settings.snapshot.clone(),
        })
    }

    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    /// Parsed DSN, if one is set.
    pub fn parsed_dsn(&self) -> Result<Option<Dsn>, ConnectionError> {
        self.dsn.as_deref().map(Dsn::parse).transpose()
    }

    /// Schema name handed to the reader.
    ///
    /// The explicit schema wins, then whatever the DSN implies. A snapshot
    /// without either gets the empty name, which matches any snapshot.
    pub fn schema_name(&self) -> ImportResult<String> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        match self.parsed_dsn()? {
            Some(dsn) => Ok(dsn.schema_name()?),
            None if self.snapshot.is_some() => Ok(String::new()),
            None => Err(ImportError::MissingSource),
        }
    }

    pub fn inspect_options(&self) -> InspectOptions {
        InspectOptions::default().with_tables(self.tables.iter().cloned())
    }
}

/// Runs one import against a catalog reader.
#[derive(Debug)]
pub struct Importer<R> {
    reader: R,
    options: ImportOptions,
}

impl<R: CatalogReader> Importer<R> {
    pub fn new(reader: R, options: ImportOptions) -> Self {
        Self { reader, options }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Inspect the configured schema without running inference.
    pub async fn inspect(&self) -> ImportResult<Catalog> {
        let schema = self.options.schema_name()?;
        let catalog = self
            .reader
            .inspect_schema(&schema, &self.options.inspect_options())
            .await?;
        if catalog.is_empty() {
            tracing::warn!(schema = %schema, "no tables inspected");
        }
        tracing::info!(schema = %schema, tables = catalog.tables.len(), "inspected catalog");
        Ok(catalog)
    }

    /// Inspect the configured schema and infer its entity graph.
    ///
    /// The reader is called exactly once. Reader failures are returned
    /// unchanged; on any error no partial output is produced.
    pub async fn schema_mutations(&self) -> ImportResult<SchemaMutations> {
        let catalog = self.inspect().await?;
        let mutations = infer(&catalog)?;
        tracing::info!(
            entities = mutations.len(),
            edges = mutations.edge_count(),
            "inferred schema mutations"
        );
        Ok(mutations)
    }
}

/// Open the reader `options` point at.
///
/// A snapshot takes precedence over the DSN. Only SQLite has a live reader;
/// other drivers fail with [`CatalogError::UnsupportedDriver`].
pub fn open_reader(options: &ImportOptions) -> ImportResult<Box<dyn CatalogReader>> {
    if let Some(path) = &options.snapshot {
        return Ok(Box::new(SnapshotReader::new(path)));
    }
    let dsn = options.parsed_dsn()?.ok_or(ImportError::MissingSource)?;
    match (dsn.driver, dsn.sqlite_path()) {
        (Driver::Sqlite, Some(path)) => Ok(Box::new(SqliteReader::open(path)?)),
        (driver, _) => Err(CatalogError::UnsupportedDriver(driver.as_str().to_string()).into()),
    }
}
