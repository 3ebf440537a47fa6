//! Catalog module.
//!
//! Plain snapshots of database metadata plus the [`CatalogReader`] capability
//! that produces them, with one reader per supported source.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                     CatalogReader                          │
//! │   inspect_schema(schema, &InspectOptions) -> Catalog       │
//! └───────────────────────────────────────────────────────────┘
//!        │                    │                     │
//!        ▼                    ▼                     ▼
//!  SqliteReader         SnapshotReader         StaticReader
//!  (PRAGMA queries)     (JSON file)            (fixed, in memory)
//! ```

mod error;
mod memory;
mod reader;
mod snapshot;
mod sqlite;
mod types;

pub use error::{CatalogError, CatalogResult};
pub use memory::StaticReader;
pub use reader::{restrict_to_tables, CatalogReader, InspectOptions};
pub use snapshot::{to_snapshot_json, SnapshotReader};
pub use sqlite::SqliteReader;
pub use types::*;
