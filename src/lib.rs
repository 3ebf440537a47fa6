//! # ermap
//!
//! Infers an entity-relationship model from a relational database catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Database / Snapshot                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [catalog reader]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Catalog (tables, columns, indexes, FKs)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [field mapper + relation classifier]
//! ┌─────────────────────────────────────────────────────────┐
//! │             Entity graph builder                         │
//! │  (join tables, O2O/O2M/M2M, child_/parent_ naming)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │   SchemaMutations (entity -> fields, edges)              │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod import;
pub mod inference;
pub mod model;

pub use catalog::{Catalog, CatalogReader, InspectOptions};
pub use import::{ImportError, ImportOptions, Importer};
pub use inference::{infer, InferenceError};
pub use model::{Edge, EdgeDirection, Entity, Field, FieldType, RelationShape, SchemaMutations};
