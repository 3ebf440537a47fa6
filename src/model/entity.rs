//! Entities derived from non-join tables.

use serde::{Deserialize, Serialize};

use super::edge::{Edge, EdgeDirection};
use super::field::Field;

/// One entity: its fields in column order and its relationship edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Singular PascalCase name, e.g. `UserGroup`.
    pub name: String,
    /// Source table name.
    pub table: String,
    pub fields: Vec<Field>,
    pub edges: Vec<Edge>,
}

impl Entity {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            fields: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn edge(&self, name: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.name == name)
    }

    pub fn has_edge(&self, name: &str) -> bool {
        self.edge(name).is_some()
    }

    /// Order edges so `To` edges come first, keeping discovery order otherwise.
    pub(crate) fn sort_edges(&mut self) {
        self.edges.sort_by_key(|e| e.direction == EdgeDirection::From);
    }
}
