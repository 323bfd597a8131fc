use crate::model::identifier::Identifier;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

/// Identifiers of one collection
pub type IdentifierSet = BTreeSet<Identifier>;

/// Point-in-time mapping of collection name to the identifiers it holds
///
/// Produced by the collector and consumed by the diff engine; nothing else
/// mutates one after it has been built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    collections: BTreeMap<String, IdentifierSet>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection with its identifiers, replacing any previous entry
    pub fn insert_collection(&mut self, name: impl Into<String>, ids: IdentifierSet) {
        self.collections.insert(name.into(), ids);
    }

    /// Identifiers of a collection, if the collection was seen
    pub fn get(&self, name: &str) -> Option<&IdentifierSet> {
        self.collections.get(name)
    }

    /// Whether the collection existed at snapshot time
    pub fn contains_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Iterate collections in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, IdentifierSet> {
        self.collections.iter()
    }

    /// Collection names in order
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total identifiers across all collections
    pub fn identifier_count(&self) -> usize {
        self.collections.values().map(BTreeSet::len).sum()
    }
}

impl<N, I> FromIterator<(N, I)> for Snapshot
where
    N: Into<String>,
    I: IntoIterator<Item = Identifier>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let collections = iter
            .into_iter()
            .map(|(name, ids)| (name.into(), ids.into_iter().collect()))
            .collect();
        Self { collections }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a IdentifierSet);
    type IntoIter = btree_map::Iter<'a, String, IdentifierSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.collections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter_dedups_identifiers() {
        let snap: Snapshot = [("users", vec![Identifier::from("a"), Identifier::from("a")])]
            .into_iter()
            .collect();
        assert_eq!(snap.get("users").map(BTreeSet::len), Some(1));
        assert_eq!(snap.identifier_count(), 1);
    }

    #[test]
    fn test_empty_collection_is_still_present() {
        let mut snap = Snapshot::new();
        snap.insert_collection("empty", IdentifierSet::new());
        assert!(snap.contains_collection("empty"));
        assert_eq!(snap.identifier_count(), 0);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_collection_names_are_case_sensitive_and_sorted() {
        let snap: Snapshot = [
            ("b", Vec::<Identifier>::new()),
            ("B", Vec::new()),
            ("a", Vec::new()),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = snap.collection_names().collect();
        assert_eq!(names, vec!["B", "a", "b"]);
        assert!(!snap.contains_collection("A"));
    }
}
