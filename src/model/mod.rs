//! Inferred entity model.
//!
//! [`SchemaMutations`] is the only output of an inference run: an ordered
//! mapping from entity name to fields and edges, handed to whatever renders
//! the target framework's schema files.

mod edge;
mod entity;
mod field;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use edge::{Edge, EdgeDirection, RelationShape};
pub use entity::Entity;
pub use field::{Field, FieldType};

/// Entities keyed by name, in table discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaMutations {
    entities: IndexMap<String, Entity>,
}

impl SchemaMutations {
    pub(crate) fn from_entities(entities: IndexMap<String, Entity>) -> Self {
        Self { entities }
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Look up the entity built from `table`.
    pub fn by_table(&self, table: &str) -> Option<&Entity> {
        self.entities.values().find(|e| e.table == table)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Total number of edges across all entities.
    pub fn edge_count(&self) -> usize {
        self.entities.values().map(|e| e.edges.len()).sum()
    }
}

impl IntoIterator for SchemaMutations {
    type Item = Entity;
    type IntoIter = indexmap::map::IntoValues<String, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_values()
    }
}
