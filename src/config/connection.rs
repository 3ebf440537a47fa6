//! Database connection strings.
//!
//! Detects the driver from a DSN and derives the schema the catalog reader
//! should inspect:
//! - Postgres: the `search_path` parameter, `public` when absent
//! - MySQL: the database named in the DSN path
//! - SQLite: `main`

use std::sync::LazyLock;

use regex::Regex;

static PG_SEARCH_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s?&])search_path=([^\s&]+)").unwrap());

/// Error type for connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    #[error("Unsupported driver: {0}. Supported: postgres, mysql, sqlite")]
    UnsupportedDriver(String),

    #[error("Cannot detect driver from DSN: {0}")]
    UnrecognizedDsn(String),

    #[error("DSN does not name a database: {0}")]
    MissingDatabase(String),
}

/// Supported database drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
    MySql,
    Sqlite,
}

impl Driver {
    /// Parse driver from its name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectionError> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Driver::Postgres),
            "mysql" | "mariadb" => Ok(Driver::MySql),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(ConnectionError::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::MySql => "mysql",
            Driver::Sqlite => "sqlite",
        }
    }

    /// Detect the driver from a DSN.
    ///
    /// Accepts URLs (`postgres://`, `mysql://`, `sqlite://`), libpq
    /// key/value strings (`host=... dbname=...`), Go MySQL DSNs
    /// (`user:pass@tcp(host:port)/db`) and bare SQLite file paths.
    pub fn detect(dsn: &str) -> Result<Self, ConnectionError> {
        let dsn = dsn.trim();
        if let Some((scheme, _)) = dsn.split_once("://") {
            return Self::from_str(scheme);
        }
        if dsn.starts_with("sqlite:") || dsn.starts_with("file:") {
            return Ok(Driver::Sqlite);
        }
        if dsn.contains("@tcp(") || dsn.contains("@unix(") {
            return Ok(Driver::MySql);
        }
        if dsn.contains("host=") || dsn.contains("dbname=") {
            return Ok(Driver::Postgres);
        }
        if [".db", ".sqlite", ".sqlite3"]
            .iter()
            .any(|ext| dsn.ends_with(ext))
            || dsn == ":memory:"
        {
            return Ok(Driver::Sqlite);
        }
        Err(ConnectionError::UnrecognizedDsn(dsn.to_string()))
    }
}

/// A parsed connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub driver: Driver,
    raw: String,
}

impl Dsn {
    pub fn parse(raw: &str) -> Result<Self, ConnectionError> {
        Ok(Self {
            driver: Driver::detect(raw)?,
            raw: raw.trim().to_string(),
        })
    }

    /// Schema name implied by the DSN.
    pub fn schema_name(&self) -> Result<String, ConnectionError> {
        match self.driver {
            Driver::Postgres => Ok(PG_SEARCH_PATH
                .captures(&self.raw)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().split(',').next())
                .filter(|s| !s.is_empty())
                .unwrap_or("public")
                .to_string()),
            Driver::MySql => {
                let rest = self
                    .raw
                    .split_once("://")
                    .map_or(self.raw.as_str(), |(_, rest)| rest);
                rest.split_once('/')
                    .and_then(|(_, path)| path.split('?').next())
                    .filter(|db| !db.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| ConnectionError::MissingDatabase(self.raw.clone()))
            }
            Driver::Sqlite => Ok("main".to_string()),
        }
    }

    /// File path for SQLite DSNs.
    pub fn sqlite_path(&self) -> Option<&str> {
        if self.driver != Driver::Sqlite {
            return None;
        }
        let path = ["sqlite://", "sqlite:", "file:"]
            .iter()
            .find_map(|prefix| self.raw.strip_prefix(prefix))
            .unwrap_or(&self.raw);
        Some(path.split('?').next().unwrap_or(path))
    }
}
