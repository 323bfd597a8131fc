//! Database access seam
//!
//! The collector and the emitter only ever talk to a `DocumentSource`.
//! `mongodiff-store` implements it over the MongoDB driver; [`memory`]
//! provides an in-process implementation for tests and dry runs.

pub mod memory;

use crate::errors::Result;
use crate::model::Identifier;
use serde_json::Value;

pub use memory::MemorySource;

/// Lazily decoded `_id` values of one collection
///
/// An `Err` item means the cursor broke mid-iteration.
pub type IdentifierStream<'a> = Box<dyn Iterator<Item = Result<Identifier>> + 'a>;

/// Read access to one database
pub trait DocumentSource {
    /// Name of the database being read
    fn database_name(&self) -> &str;

    /// All collection names currently in the database
    ///
    /// # Errors
    ///
    /// `Connectivity` when the server cannot be asked.
    fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Stream the identifiers of every document in a collection
    ///
    /// Implementations must read the `_id` field only, never full bodies.
    ///
    /// # Errors
    ///
    /// `Read` when the cursor cannot be opened; per-item errors for
    /// failures during iteration, `UnsupportedIdentifier` and
    /// `MissingIdentifier` for `_id` values that cannot be modelled.
    fn identifiers<'a>(&'a self, collection: &str) -> Result<IdentifierStream<'a>>;

    /// Fetch one full document as relaxed extended JSON
    ///
    /// `Ok(None)` when no document has that identifier.
    ///
    /// # Errors
    ///
    /// `Read` when the lookup itself fails.
    fn fetch_document(&self, collection: &str, id: &Identifier) -> Result<Option<Value>>;
}
