//! Typed entity fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic field type, independent of the database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float,
    String,
    Bytes,
    Time,
    Uuid,
    Json,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float => "float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Time => "time",
            Self::Uuid => "uuid",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed field derived from one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Logical field name.
    pub name: String,
    /// Semantic type.
    pub ty: FieldType,
    /// Nullable and not part of the primary key.
    pub optional: bool,
    /// Covered by a single-column unique index other than the primary key.
    pub unique: bool,
    /// Column comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Underlying column name, when it differs from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    /// Column default expression, passed through for the serializer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            unique: false,
            comment: None,
            storage_key: None,
            default_value: None,
        }
    }

    /// The column this field is stored in.
    pub fn column_name(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(&self.name)
    }
}

/// Builder-style rendering, e.g. `string("id").storage_key("name")`.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.ty, self.name)?;
        if self.optional {
            f.write_str(".optional()")?;
        }
        if self.unique {
            f.write_str(".unique()")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, ".comment({comment:?})")?;
        }
        if let Some(key) = &self.storage_key {
            write!(f, ".storage_key({key:?})")?;
        }
        Ok(())
    }
}
