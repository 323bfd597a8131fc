//! mongodiff core - snapshot, diff and replay-artifact engine
//!
//! This crate holds everything that does not need a live database driver:
//! - Identifier, Identifier Set, Snapshot and Change Set models
//! - The `DocumentSource` seam plus an in-memory implementation
//! - Snapshot collection with collection exclusion
//! - The two-pass diff engine and the human-readable change report
//! - The render plan and the all-or-nothing artifact emitter
//! - The error and logging facilities shared by the other crates
//!
//! Pipeline: `collect` → (pause) → `collect` → `compute_changes` → `emit`.

pub mod collector;
pub mod config;
pub mod diff;
pub mod emit;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod source;

#[doc(hidden)]
pub use mongodiff_core_types as core_types;

// Re-export commonly used types
pub use collector::{capture_changes, collect};
pub use config::{Credentials, ExcludeList, RunConfig};
pub use diff::compute_changes;
pub use emit::{emit, EmitReport};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use model::{ChangeKind, ChangeSet, CollectionChange, Identifier, IdentifierSet, Snapshot};
pub use source::DocumentSource;
