//! Directional relationship edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a relationship an edge sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    /// This entity owns the relation and points at the target.
    To,
    /// This entity is the inverse side, referencing back to a `To` edge.
    From,
}

/// Relationship shape recovered from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationShape {
    /// One-to-one: the foreign key column is unique.
    O2O,
    /// One-to-many: plain foreign key.
    O2M,
    /// Many-to-many through a join table.
    M2M,
}

impl RelationShape {
    /// Whether the owning (`To`) side holds at most one target.
    pub fn to_side_unique(&self) -> bool {
        matches!(self, Self::O2O)
    }

    /// Whether the inverse (`From`) side holds at most one target.
    pub fn from_side_unique(&self) -> bool {
        matches!(self, Self::O2O | Self::O2M)
    }
}

impl fmt::Display for RelationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::O2O => write!(f, "1:1"),
            Self::O2M => write!(f, "1:N"),
            Self::M2M => write!(f, "N:N"),
        }
    }
}

/// A relationship edge attached to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub direction: EdgeDirection,
    /// Relation name, unique within the entity.
    pub name: String,
    /// Target entity name.
    pub target: String,
    /// Cardinality on this side is one.
    pub unique: bool,
    /// For `From` edges: name of the `To` edge on the target.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// For `From` edges: field holding the foreign key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub shape: RelationShape,
}

impl Edge {
    /// An owning edge.
    pub fn to(name: impl Into<String>, target: impl Into<String>, shape: RelationShape) -> Self {
        Self {
            direction: EdgeDirection::To,
            name: name.into(),
            target: target.into(),
            unique: shape.to_side_unique(),
            ref_name: None,
            field: None,
            shape,
        }
    }

    /// An inverse edge referencing the `To` edge named `ref_name` on `target`.
    pub fn from_ref(
        name: impl Into<String>,
        target: impl Into<String>,
        ref_name: impl Into<String>,
        shape: RelationShape,
    ) -> Self {
        Self {
            direction: EdgeDirection::From,
            name: name.into(),
            target: target.into(),
            unique: shape.from_side_unique(),
            ref_name: Some(ref_name.into()),
            field: None,
            shape,
        }
    }

    /// Builder: bind the edge to a foreign key field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Builder-style rendering, e.g. `from("user", User).ref("pets").unique().field("user_pets")`.
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.direction {
            EdgeDirection::To => "to",
            EdgeDirection::From => "from",
        };
        write!(f, "{kind}({:?}, {})", self.name, self.target)?;
        if let Some(ref_name) = &self.ref_name {
            write!(f, ".ref({ref_name:?})")?;
        }
        if self.unique {
            f.write_str(".unique()")?;
        }
        if let Some(field) = &self.field {
            write!(f, ".field({field:?})")?;
        }
        Ok(())
    }
}
