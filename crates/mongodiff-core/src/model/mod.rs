//! Identifier-level data model
//!
//! All collections are `BTreeMap`/`BTreeSet` backed so that iteration order
//! is a pure function of content; emission relies on this for byte-identical
//! reruns.

pub mod change_set;
pub mod identifier;
pub mod snapshot;

pub use change_set::{ChangeKind, ChangeSet, CollectionChange};
pub use identifier::Identifier;
pub use snapshot::{IdentifierSet, Snapshot};
