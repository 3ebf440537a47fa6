//! SQLite catalog reader.
//!
//! Reads tables from `sqlite_master` and everything else through the
//! table-valued pragma functions (`pragma_table_info`, `pragma_index_list`,
//! `pragma_index_info`, `pragma_foreign_key_list`).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection};

use super::error::{CatalogError, CatalogResult};
use super::reader::{CatalogReader, InspectOptions};
use super::types::{Catalog, Column, ForeignKey, Index, PrimaryKey, Table};

/// Schema used when the caller passes an empty name.
pub const DEFAULT_SCHEMA: &str = "main";

/// Reads catalog metadata from a SQLite database.
///
/// Inspection runs on the calling task; SQLite catalogs are local and small.
pub struct SqliteReader {
    conn: Mutex<Connection>,
}

impl SqliteReader {
    /// Open a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Wrap an existing connection (e.g. `Connection::open_in_memory()`).
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn inspect(&self, schema: &str, options: &InspectOptions) -> CatalogResult<Catalog> {
        let schema = if schema.is_empty() {
            DEFAULT_SCHEMA
        } else {
            schema
        };
        let conn = self
            .conn
            .lock()
            .map_err(|_| CatalogError::Other("sqlite connection lock poisoned".to_string()))?;

        if !schema_exists(&conn, schema)? {
            return Err(CatalogError::SchemaNotFound(schema.to_string()));
        }

        let mut catalog = Catalog::new(schema);
        for name in table_names(&conn, schema)? {
            if !options.includes(&name) {
                continue;
            }
            catalog.tables.push(read_table(&conn, schema, &name)?);
        }

        tracing::debug!(schema, tables = catalog.tables.len(), "inspected sqlite schema");
        Ok(catalog)
    }
}

#[async_trait]
impl CatalogReader for SqliteReader {
    async fn inspect_schema(
        &self,
        schema: &str,
        options: &InspectOptions,
    ) -> CatalogResult<Catalog> {
        self.inspect(schema, options)
    }
}

fn schema_exists(conn: &Connection, schema: &str) -> CatalogResult<bool> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_database_list")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|n| n == schema))
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn table_names(conn: &Connection, schema: &str) -> CatalogResult<Vec<String>> {
    let sql = format!(
        "SELECT name FROM {}.sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid",
        quote_ident(schema)
    );
    let mut stmt = conn.prepare(&sql)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn read_table(conn: &Connection, schema: &str, name: &str) -> CatalogResult<Table> {
    let mut table = Table::new(name);

    // (pk position, column name) for columns that are part of the primary key.
    let mut pk_columns: Vec<(i64, String)> = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1, ?2) ORDER BY cid",
    )?;
    let rows = stmt.query_map(params![name, schema], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, i64>(4)?,
        ))
    })?;
    for row in rows {
        let (column, data_type, not_null, default_value, pk) = row?;
        if pk > 0 {
            pk_columns.push((pk, column.clone()));
        }
        table.columns.push(Column {
            name: column,
            data_type: data_type.unwrap_or_default(),
            is_nullable: not_null == 0,
            comment: None,
            default_value,
        });
    }

    if !pk_columns.is_empty() {
        pk_columns.sort_by_key(|(position, _)| *position);
        table.primary_key = Some(PrimaryKey {
            name: None,
            columns: pk_columns.into_iter().map(|(_, c)| c).collect(),
        });
    }

    table.indexes = read_indexes(conn, schema, name)?;
    table.foreign_keys = read_foreign_keys(conn, schema, name)?;
    Ok(table)
}

fn read_indexes(conn: &Connection, schema: &str, table: &str) -> CatalogResult<Vec<Index>> {
    let mut stmt =
        conn.prepare("SELECT name, \"unique\", origin FROM pragma_index_list(?1, ?2) ORDER BY seq")?;
    let entries = stmt
        .query_map(params![table, schema], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut info = conn.prepare(
        "SELECT name FROM pragma_index_info(?1, ?2) WHERE name IS NOT NULL ORDER BY seqno",
    )?;
    let mut indexes = Vec::with_capacity(entries.len());
    for (name, unique, origin) in entries {
        let columns = info
            .query_map(params![name, schema], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        indexes.push(Index {
            name,
            columns,
            is_unique: unique != 0,
            is_primary: origin == "pk",
        });
    }
    Ok(indexes)
}

fn read_foreign_keys(
    conn: &Connection,
    schema: &str,
    table: &str,
) -> CatalogResult<Vec<ForeignKey>> {
    let mut stmt = conn.prepare(
        "SELECT id, \"table\", \"from\", \"to\", on_update, on_delete \
         FROM pragma_foreign_key_list(?1, ?2) ORDER BY id, seq",
    )?;
    let rows = stmt.query_map(params![table, schema], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, Option<String>>(5)?,
        ))
    })?;

    let mut grouped: BTreeMap<i64, ForeignKey> = BTreeMap::new();
    for row in rows {
        let (id, referenced_table, from, to, on_update, on_delete) = row?;
        let fk = grouped.entry(id).or_insert_with(|| ForeignKey {
            name: format!("{table}_fk_{id}"),
            columns: Vec::new(),
            referenced_table,
            referenced_columns: Vec::new(),
            on_delete: on_delete.filter(|a| a != "NO ACTION"),
            on_update: on_update.filter(|a| a != "NO ACTION"),
        });
        fk.columns.push(from);
        if let Some(to) = to {
            fk.referenced_columns.push(to);
        }
    }

    // SQLite numbers foreign keys in reverse declaration order.
    Ok(grouped.into_values().rev().collect())
}
