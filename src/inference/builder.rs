//! Entity graph construction.
//!
//! Drives the field mapper over every column and the relation classifier
//! over every foreign key, then assembles the final [`SchemaMutations`].

use indexmap::IndexMap;

use crate::catalog::Catalog;
use crate::model::{Entity, SchemaMutations};

use super::error::{InferenceError, InferenceResult};
use super::fields::FieldMapper;
use super::naming::entity_name;
use super::relations::{EdgePair, RelationClassifier};

/// Builds the entity graph for one catalog snapshot.
///
/// # Example
///
/// ```ignore
/// let mutations = EntityGraphBuilder::new(&catalog).build()?;
/// for entity in mutations.iter() {
///     println!("{}: {} fields, {} edges", entity.name, entity.fields.len(), entity.edges.len());
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EntityGraphBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> EntityGraphBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Run inference.
    ///
    /// Join tables are detected before anything else is built, and every
    /// fatal error is raised before the output is returned: the result is
    /// either the complete graph or an error.
    pub fn build(&self) -> InferenceResult<SchemaMutations> {
        let classifier = RelationClassifier::new(self.catalog)?;

        let mut entities: IndexMap<String, Entity> = IndexMap::new();
        let mut sources: IndexMap<String, Vec<String>> = IndexMap::new();
        for table in &self.catalog.tables {
            if classifier.is_join_table(&table.name) {
                tracing::debug!(table = %table.name, "excluding join table");
                continue;
            }

            let name = entity_name(&table.name);
            sources
                .entry(name.clone())
                .or_default()
                .push(table.name.clone());

            let mut entity = Entity::new(name.clone(), table.name.clone());
            entity.fields = FieldMapper::new(table).map_all()?;
            entities.insert(name, entity);
        }

        if let Some((name, tables)) = sources.into_iter().find(|(_, t)| t.len() > 1) {
            return Err(InferenceError::DuplicateEntity { name, tables });
        }

        for table in &self.catalog.tables {
            if let Some(join) = classifier.join_table(&table.name) {
                let pair = classifier.classify_join(join);
                attach(&mut entities, pair, &table.name);
                continue;
            }
            for fk in &table.foreign_keys {
                if let Some(pair) = classifier.classify_foreign_key(table, fk) {
                    let suffix = fk.single_column().unwrap_or(&fk.name);
                    attach(&mut entities, pair, suffix);
                }
            }
        }

        for entity in entities.values_mut() {
            entity.sort_edges();
            tracing::debug!(
                entity = %entity.name,
                fields = entity.fields.len(),
                edges = entity.edges.len(),
                "built entity"
            );
        }

        Ok(SchemaMutations::from_entities(entities))
    }
}

/// Convenience wrapper around [`EntityGraphBuilder`].
pub fn infer(catalog: &Catalog) -> InferenceResult<SchemaMutations> {
    EntityGraphBuilder::new(catalog).build()
}

/// Add both edges of a pair to their entities.
///
/// When either name is already taken on its entity, both edges are renamed
/// with `_<suffix>` so each foreign key keeps its own distinct pair.
fn attach(entities: &mut IndexMap<String, Entity>, mut pair: EdgePair, suffix: &str) {
    let taken = |entities: &IndexMap<String, Entity>, entity: &str, edge: &str| {
        entities.get(entity).is_some_and(|e| e.has_edge(edge))
    };
    if taken(entities, &pair.to_entity, &pair.to.name)
        || taken(entities, &pair.from_entity, &pair.from.name)
    {
        tracing::debug!(
            to = %pair.to.name,
            from = %pair.from.name,
            suffix,
            "relation name collision, qualifying edges"
        );
        pair.qualify(suffix);
    }

    if let Some(entity) = entities.get_mut(&pair.to_entity) {
        entity.edges.push(pair.to);
    }
    if let Some(entity) = entities.get_mut(&pair.from_entity) {
        entity.edges.push(pair.from);
    }
}
