//! In-memory document source
//!
//! Holds collections as ordered maps of identifier to JSON body behind a
//! `RefCell`, so a test can mutate the "database" from inside the pause
//! callback while the capture still holds a shared reference.

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::Identifier;
use crate::source::{DocumentSource, IdentifierStream};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

type Collection = BTreeMap<Identifier, Value>;

/// Single-threaded in-memory database
#[derive(Debug, Default)]
pub struct MemorySource {
    database: String,
    collections: RefCell<BTreeMap<String, Collection>>,
    failing_reads: RefCell<BTreeSet<String>>,
    unreachable: RefCell<bool>,
}

impl MemorySource {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Create an empty collection if it does not exist yet
    pub fn create_collection(&self, name: &str) {
        self.collections
            .borrow_mut()
            .entry(name.to_string())
            .or_default();
    }

    /// Insert or replace a document, creating its collection on demand
    ///
    /// `_id` is set from `id` in extended JSON form; any `_id` in `body`
    /// is overwritten.
    pub fn insert(&self, collection: &str, id: Identifier, body: Value) {
        let mut document = Map::new();
        document.insert("_id".to_string(), id.to_extended_json());
        match body {
            Value::Object(map) => {
                for (key, value) in map {
                    if key != "_id" {
                        document.insert(key, value);
                    }
                }
            }
            other => {
                document.insert("value".to_string(), other);
            }
        }
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .insert(id, Value::Object(document));
    }

    /// Remove a single document
    pub fn remove(&self, collection: &str, id: &Identifier) {
        if let Some(docs) = self.collections.borrow_mut().get_mut(collection) {
            docs.remove(id);
        }
    }

    /// Drop a whole collection
    pub fn drop_collection(&self, name: &str) {
        self.collections.borrow_mut().remove(name);
    }

    /// Make identifier iteration over `collection` break after the first item
    pub fn fail_reads_on(&self, collection: &str) {
        self.failing_reads
            .borrow_mut()
            .insert(collection.to_string());
    }

    /// Make collection listing fail as if the server went away
    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.borrow_mut() = unreachable;
    }
}

impl DocumentSource for MemorySource {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        if *self.unreachable.borrow() {
            return Err(ExError::new(ExErrorKind::Connectivity)
                .with_op("list_collections")
                .with_message(format!("database {} is unreachable", self.database)));
        }
        Ok(self.collections.borrow().keys().cloned().collect())
    }

    fn identifiers<'a>(&'a self, collection: &str) -> Result<IdentifierStream<'a>> {
        let ids: Vec<Identifier> = self
            .collections
            .borrow()
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default();

        if self.failing_reads.borrow().contains(collection) {
            let failure = ExError::new(ExErrorKind::Read)
                .with_op("collect_snapshot")
                .with_collection(collection)
                .with_message("cursor closed unexpectedly");
            let items = ids.into_iter().take(1).map(Ok).chain(Some(Err(failure)));
            return Ok(Box::new(items));
        }

        Ok(Box::new(ids.into_iter().map(Ok)))
    }

    fn fetch_document(&self, collection: &str, id: &Identifier) -> Result<Option<Value>> {
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_sets_extended_json_id() {
        let source = MemorySource::new("test");
        let id = Identifier::object_id_from_hex("501ca04b668d67b3d6489f3a").unwrap();
        source.insert("users", id.clone(), json!({"name": "ada", "_id": 1}));

        let doc = source.fetch_document("users", &id).unwrap().unwrap();
        assert_eq!(doc["_id"], json!({"$oid": "501ca04b668d67b3d6489f3a"}));
        assert_eq!(doc["name"], json!("ada"));
    }

    #[test]
    fn test_failing_reads_yield_error_after_first_item() {
        let source = MemorySource::new("test");
        source.insert("users", Identifier::from("a"), json!({}));
        source.insert("users", Identifier::from("b"), json!({}));
        source.fail_reads_on("users");

        let items: Vec<_> = source.identifiers("users").unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(
            items[1].as_ref().unwrap_err().kind(),
            ExErrorKind::Read
        );
    }

    #[test]
    fn test_unreachable_listing_fails_with_connectivity() {
        let source = MemorySource::new("test");
        source.set_unreachable(true);
        let err = source.list_collection_names().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Connectivity);
    }

    #[test]
    fn test_drop_and_missing_fetch() {
        let source = MemorySource::new("test");
        source.insert("temp", Identifier::from("x"), json!({}));
        source.drop_collection("temp");
        assert!(source.list_collection_names().unwrap().is_empty());
        assert_eq!(
            source.fetch_document("temp", &Identifier::from("x")).unwrap(),
            None
        );
    }
}
