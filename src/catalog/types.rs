//! Catalog types produced by a [`CatalogReader`](super::CatalogReader).
//!
//! These are plain snapshots of what the database reports. Inference copies
//! whatever it needs out of them, so a catalog can be dropped or re-inspected
//! as soon as a run completes.

use serde::{Deserialize, Serialize};

/// An inspected schema: every table the reader returned, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Schema (or search path) the catalog was read from.
    #[serde(default)]
    pub name: String,
    /// Tables in discovery order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Catalog {
    /// Create an empty catalog for a schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Builder: append a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Look up a table by exact name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Whether a table with this name was inspected.
    pub fn contains(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// A table and its constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in ordinal order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Primary key (if any).
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    /// Indexes, including the one backing the primary key when the engine reports it.
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Foreign keys in declaration order.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: append a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder: set the primary key columns.
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(PrimaryKey {
            name: None,
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder: append an index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Builder: append a foreign key.
    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key column names, empty when the table has none.
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_key
            .as_ref()
            .map(|pk| pk.columns.as_slice())
            .unwrap_or_default()
    }

    /// Whether the column is part of the primary key.
    pub fn is_primary_key_column(&self, column: &str) -> bool {
        self.primary_key_columns().iter().any(|c| c == column)
    }

    /// Whether an index is the one backing the primary key.
    pub fn is_primary_index(&self, index: &Index) -> bool {
        index.is_primary
            || (!self.primary_key_columns().is_empty()
                && index.columns.as_slice() == self.primary_key_columns())
    }

    /// Whether a single-column unique index, other than the primary key, covers `column`.
    ///
    /// Composite unique indexes never count.
    pub fn has_unique_index_on(&self, column: &str) -> bool {
        self.indexes.iter().any(|idx| {
            idx.is_unique
                && idx.columns.len() == 1
                && idx.columns[0] == column
                && !self.is_primary_index(idx)
        })
    }
}

/// A table column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Database-specific type name, e.g. `character varying(255)`.
    pub data_type: String,
    /// Whether NULL values are allowed.
    #[serde(default)]
    pub is_nullable: bool,
    /// Column comment, when the engine supports them.
    #[serde(default)]
    pub comment: Option<String>,
    /// Default value expression.
    #[serde(default)]
    pub default_value: Option<String>,
}

impl Column {
    /// A NOT NULL column.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Default::default()
        }
    }

    /// Builder: mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Builder: attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder: attach a default expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }
}

/// Primary key constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    /// Constraint name, when the engine names it.
    #[serde(default)]
    pub name: Option<String>,
    /// Columns in the primary key (ordered).
    pub columns: Vec<String>,
}

/// An index over one or more columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns (ordered).
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub is_unique: bool,
    /// Whether the engine reports this index as the primary key.
    #[serde(default)]
    pub is_primary: bool,
}

impl Index {
    /// A non-unique index.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_unique: false,
            is_primary: false,
        }
    }

    /// A unique index.
    pub fn unique<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_unique: true,
            ..Self::new(name, columns)
        }
    }
}

/// Foreign key constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Local columns (ordered).
    pub columns: Vec<String>,
    /// Name of the referenced table.
    pub referenced_table: String,
    /// Columns in the referenced table (ordered). May be empty when the
    /// engine leaves an implicit primary key reference unresolved.
    #[serde(default)]
    pub referenced_columns: Vec<String>,
    /// ON DELETE action.
    #[serde(default)]
    pub on_delete: Option<String>,
    /// ON UPDATE action.
    #[serde(default)]
    pub on_update: Option<String>,
}

impl ForeignKey {
    /// A single-column foreign key.
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: vec![column.into()],
            referenced_table: referenced_table.into(),
            referenced_columns: vec![referenced_column.into()],
            on_delete: None,
            on_update: None,
        }
    }

    /// The local column when the key has exactly one.
    pub fn single_column(&self) -> Option<&str> {
        match self.columns.as_slice() {
            [column] => Some(column),
            _ => None,
        }
    }

    /// Whether the key points back at the table that owns it.
    pub fn is_self_reference(&self, owner: &str) -> bool {
        self.referenced_table == owner
    }
}
