//! Inference error types.

use thiserror::Error;

/// Result type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Fatal inference errors. Any of these aborts the run with no output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// A column type has no semantic field mapping.
    #[error("unsupported type {data_type:?} for column {table}.{column}")]
    UnsupportedType {
        table: String,
        column: String,
        data_type: String,
    },

    /// A join table references tables outside the inspected set.
    #[error(
        "join table {join_table:?} references {} outside the inspected set; \
         join tables must be inspected together with their referenced tables \
         (add them to the table selection)",
        .missing.join(", ")
    )]
    MissingReferencedTable {
        join_table: String,
        missing: Vec<String>,
    },

    /// Two tables map to the same entity name.
    #[error("tables {} all map to entity {name:?}", .tables.join(", "))]
    DuplicateEntity { name: String, tables: Vec<String> },
}

impl InferenceError {
    pub fn unsupported_type(
        table: impl Into<String>,
        column: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self::UnsupportedType {
            table: table.into(),
            column: column.into(),
            data_type: data_type.into(),
        }
    }
}
