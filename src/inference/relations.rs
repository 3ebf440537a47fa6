//! Foreign key classification.
//!
//! Every foreign key in the catalog ends up in one of three places:
//!
//! 1. Part of an implicit join table: the table is dropped and its two keys
//!    become one M2M edge pair between the referenced entities.
//! 2. A single-column key between two inspected entities: an O2O or O2M
//!    edge pair, depending on whether the key column is unique.
//! 3. Anything else (unresolved target, composite key on a regular table):
//!    no edge. The key column still appears as a field.

use std::collections::{BTreeSet, HashSet};

use crate::catalog::{Catalog, ForeignKey, Table};
use crate::model::{Edge, RelationShape};

use super::error::{InferenceError, InferenceResult};
use super::fields::FieldMapper;
use super::naming::{entity_name, relation_names, RelationNames};

/// A table that only encodes a many-to-many relation.
#[derive(Debug, Clone, Copy)]
pub struct JoinTable<'a> {
    pub table: &'a Table,
    /// Foreign key whose target holds the `To` edge.
    pub first: &'a ForeignKey,
    /// Foreign key whose target holds the `From` edge.
    pub second: &'a ForeignKey,
}

impl<'a> JoinTable<'a> {
    /// Detect whether `table` is a join table.
    ///
    /// A join table has a composite primary key made of exactly the columns
    /// of its two foreign keys, and no other foreign keys.
    pub fn detect(table: &'a Table) -> Option<Self> {
        let pk = table.primary_key_columns();
        if pk.len() < 2 {
            return None;
        }
        let [first, second] = table.foreign_keys.as_slice() else {
            return None;
        };
        if first.columns.is_empty() || second.columns.is_empty() {
            return None;
        }

        let pk_columns: BTreeSet<&str> = pk.iter().map(String::as_str).collect();
        let fk_columns: BTreeSet<&str> = first
            .columns
            .iter()
            .chain(&second.columns)
            .map(String::as_str)
            .collect();
        if pk_columns != fk_columns {
            return None;
        }

        Some(Self {
            table,
            first,
            second,
        })
    }

    /// Both foreign keys point at the same table.
    pub fn is_self_referential(&self) -> bool {
        self.first.referenced_table == self.second.referenced_table
    }

    /// Referenced tables in foreign key order, deduplicated.
    pub fn referenced_tables(&self) -> Vec<&'a str> {
        let mut tables = vec![self.first.referenced_table.as_str()];
        if !self.is_self_referential() {
            tables.push(self.second.referenced_table.as_str());
        }
        tables
    }
}

/// The two edges of one classified relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePair {
    pub shape: RelationShape,
    /// Entity that receives the `To` edge.
    pub to_entity: String,
    pub to: Edge,
    /// Entity that receives the `From` edge.
    pub from_entity: String,
    pub from: Edge,
}

impl EdgePair {
    fn build(
        shape: RelationShape,
        to_entity: String,
        from_entity: String,
        names: RelationNames,
        field: Option<String>,
    ) -> Self {
        let to = Edge::to(names.to.clone(), from_entity.clone(), shape);
        let mut from = Edge::from_ref(names.from, to_entity.clone(), names.to, shape);
        from.field = field;
        Self {
            shape,
            to_entity,
            to,
            from_entity,
            from,
        }
    }

    /// Rename both edges with `_<suffix>`, keeping the back-reference in step.
    pub fn qualify(&mut self, suffix: &str) {
        let names = RelationNames {
            to: self.to.name.clone(),
            from: self.from.name.clone(),
        }
        .qualified(suffix);
        self.to.name = names.to.clone();
        self.from.name = names.from;
        self.from.ref_name = Some(names.to);
    }
}

/// Classifies the foreign keys of one inspected catalog.
#[derive(Debug)]
pub struct RelationClassifier<'a> {
    catalog: &'a Catalog,
    join_tables: Vec<JoinTable<'a>>,
    join_names: HashSet<&'a str>,
}

impl<'a> RelationClassifier<'a> {
    /// Detect join tables up front.
    ///
    /// Fails with [`InferenceError::MissingReferencedTable`] when a join
    /// table references a table outside the inspected set.
    pub fn new(catalog: &'a Catalog) -> InferenceResult<Self> {
        let join_tables: Vec<JoinTable<'a>> =
            catalog.tables.iter().filter_map(JoinTable::detect).collect();
        let join_names: HashSet<&str> = join_tables.iter().map(|j| j.table.name.as_str()).collect();

        for join in &join_tables {
            let missing: Vec<String> = join
                .referenced_tables()
                .into_iter()
                .filter(|t| !catalog.contains(t) || join_names.contains(t))
                .map(str::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(InferenceError::MissingReferencedTable {
                    join_table: join.table.name.clone(),
                    missing,
                });
            }
        }

        Ok(Self {
            catalog,
            join_tables,
            join_names,
        })
    }

    pub fn is_join_table(&self, table: &str) -> bool {
        self.join_names.contains(table)
    }

    pub fn join_table(&self, table: &str) -> Option<&JoinTable<'a>> {
        self.join_tables.iter().find(|j| j.table.name == table)
    }

    /// Whether `table` becomes an entity in this run.
    pub fn is_entity_table(&self, table: &str) -> bool {
        self.catalog.contains(table) && !self.is_join_table(table)
    }

    /// Edge pair for a join table.
    ///
    /// The first foreign key's target owns the `To` edge. Neither side is
    /// bound to a field: the join table exposes none.
    pub fn classify_join(&self, join: &JoinTable<'_>) -> EdgePair {
        let to_table = join.first.referenced_table.as_str();
        let from_table = join.second.referenced_table.as_str();
        let names = relation_names(RelationShape::M2M, to_table, from_table);
        tracing::debug!(
            join_table = %join.table.name,
            to = %names.to,
            from = %names.from,
            "classified join table as M2M"
        );
        EdgePair::build(
            RelationShape::M2M,
            entity_name(to_table),
            entity_name(from_table),
            names,
            None,
        )
    }

    /// Edge pair for a foreign key on a regular table.
    ///
    /// The referenced entity owns the `To` edge and `owner` gets a `From` edge
    /// bound to the key column. Returns `None` (and logs why) when the key has
    /// more than one column or its target was not inspected.
    pub fn classify_foreign_key(&self, owner: &Table, fk: &ForeignKey) -> Option<EdgePair> {
        let Some(column) = fk.single_column() else {
            tracing::warn!(
                table = %owner.name,
                foreign_key = %fk.name,
                columns = fk.columns.len(),
                "skipping edge for composite foreign key"
            );
            return None;
        };
        if !self.is_entity_table(&fk.referenced_table) {
            tracing::warn!(
                table = %owner.name,
                foreign_key = %fk.name,
                referenced = %fk.referenced_table,
                "referenced table not inspected, other side ignored"
            );
            return None;
        }

        let shape = foreign_key_shape(owner, column);
        let names = relation_names(shape, &fk.referenced_table, &owner.name);
        let field = FieldMapper::new(owner).field_name(column);
        tracing::debug!(
            table = %owner.name,
            column,
            referenced = %fk.referenced_table,
            %shape,
            self_reference = fk.is_self_reference(&owner.name),
            "classified foreign key"
        );
        Some(EdgePair::build(
            shape,
            entity_name(&fk.referenced_table),
            entity_name(&owner.name),
            names,
            Some(field),
        ))
    }
}

/// Cardinality of a single-column foreign key: O2O when the column carries
/// its own unique index or is the whole primary key, O2M otherwise.
pub fn foreign_key_shape(owner: &Table, column: &str) -> RelationShape {
    let is_whole_pk = matches!(owner.primary_key_columns(), [pk] if pk == column);
    if is_whole_pk || owner.has_unique_index_on(column) {
        RelationShape::O2O
    } else {
        RelationShape::O2M
    }
}
