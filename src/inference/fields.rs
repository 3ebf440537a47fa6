//! Column to field mapping.
//!
//! Each column becomes exactly one [`Field`]: its native type goes through a
//! fixed lookup table, and its modifiers are read off the table's primary
//! key, unique indexes and comment.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Column, Table};
use crate::model::{Field, FieldType};

use super::error::{InferenceError, InferenceResult};

/// Name every single-column primary key is exposed under.
pub const ID_FIELD: &str = "id";

/// Length/precision parameters, e.g. `(255)` or `(10, 2)`.
static TYPE_PARAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());

/// Map a native column type to its semantic field type.
///
/// Matching is case-insensitive and ignores length/precision parameters.
/// MySQL `unsigned` integers map to the unsigned variants and `tinyint(1)`
/// is treated as a boolean. Returns `None` for unsupported types.
pub fn field_type(data_type: &str) -> Option<FieldType> {
    let lower = data_type.trim().to_lowercase();
    if lower == "tinyint(1)" {
        return Some(FieldType::Bool);
    }

    let stripped = TYPE_PARAMS.replace_all(&lower, "");
    let mut words: Vec<&str> = stripped.split_whitespace().collect();
    let unsigned = words.contains(&"unsigned");
    words.retain(|w| *w != "unsigned" && *w != "zerofill");
    let base = words.join(" ");

    let ty = match base.as_str() {
        "bool" | "boolean" => FieldType::Bool,
        "tinyint" => FieldType::Int8,
        "smallint" | "int2" | "smallserial" | "serial2" => FieldType::Int16,
        "mediumint" => FieldType::Int32,
        "integer" | "int" | "int4" | "serial" | "serial4" => FieldType::Int,
        "bigint" | "int8" | "bigserial" | "serial8" => FieldType::Int64,
        "real" | "float4" => FieldType::Float32,
        "double precision" | "double" | "float8" | "float" | "numeric" | "decimal" => {
            FieldType::Float
        }
        "text" | "varchar" | "character varying" | "char" | "character" | "bpchar" | "citext"
        | "nvarchar" | "nchar" | "tinytext" | "mediumtext" | "longtext" | "clob" | "name" => {
            FieldType::String
        }
        "bytea" | "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
            FieldType::Bytes
        }
        "date" | "time" | "timetz" | "timestamp" | "timestamptz" | "datetime"
        | "time with time zone" | "time without time zone" | "timestamp with time zone"
        | "timestamp without time zone" => FieldType::Time,
        "uuid" => FieldType::Uuid,
        "json" | "jsonb" => FieldType::Json,
        _ => return None,
    };

    if unsigned {
        return match ty {
            FieldType::Int8 => Some(FieldType::Uint8),
            FieldType::Int16 => Some(FieldType::Uint16),
            FieldType::Int32 | FieldType::Int => Some(FieldType::Uint32),
            FieldType::Int64 => Some(FieldType::Uint64),
            other => Some(other),
        };
    }
    Some(ty)
}

/// Maps the columns of one table to fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapper<'a> {
    table: &'a Table,
}

impl<'a> FieldMapper<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Map every column, in column order.
    pub fn map_all(&self) -> InferenceResult<Vec<Field>> {
        self.table
            .columns
            .iter()
            .map(|c| self.map_column(c))
            .collect()
    }

    /// Map a single column.
    pub fn map_column(&self, column: &Column) -> InferenceResult<Field> {
        let ty = field_type(&column.data_type).ok_or_else(|| {
            InferenceError::unsupported_type(&self.table.name, &column.name, &column.data_type)
        })?;

        let is_pk = self.table.is_primary_key_column(&column.name);
        let mut field = Field::new(self.field_name(&column.name), ty);
        field.optional = column.is_nullable && !is_pk;
        field.unique = self.table.has_unique_index_on(&column.name);
        field.comment = column.comment.clone().filter(|c| !c.is_empty());
        if field.name != column.name {
            field.storage_key = Some(column.name.clone());
        }
        field.default_value = column.default_value.clone();
        Ok(field)
    }

    /// Logical name for a column.
    ///
    /// A single-column primary key is exposed as [`ID_FIELD`], unless another
    /// column already uses that name.
    pub fn field_name(&self, column: &str) -> String {
        match self.table.primary_key_columns() {
            [pk] if pk == column && column != ID_FIELD && self.table.column(ID_FIELD).is_none() => {
                ID_FIELD.to_string()
            }
            _ => column.to_string(),
        }
    }
}
