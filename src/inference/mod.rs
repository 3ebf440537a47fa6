//! Relation inference engine.
//!
//! Converts a [`Catalog`](crate::catalog::Catalog) into entities, typed fields
//! and directional edges.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   EntityGraphBuilder                      │
//! │  1. RelationClassifier::new   (join tables, fail fast)    │
//! │  2. FieldMapper per column    (types, modifiers)          │
//! │  3. RelationClassifier per FK (O2O / O2M / M2M pairs)     │
//! │  4. edge ordering             (To before From)            │
//! └──────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//!                   SchemaMutations
//! ```
//!
//! Inference is synchronous and pure: it reads the catalog, never mutates
//! it, and performs no I/O.
//!
//! # Example
//!
//! ```ignore
//! use ermap::inference::infer;
//!
//! let mutations = infer(&catalog)?;
//! let user = mutations.get("User").unwrap();
//! ```

mod builder;
mod error;
mod fields;
pub mod naming;
mod relations;

pub use builder::{infer, EntityGraphBuilder};
pub use error::{InferenceError, InferenceResult};
pub use fields::{field_type, FieldMapper, ID_FIELD};
pub use relations::{foreign_key_shape, EdgePair, JoinTable, RelationClassifier};
