use crate::model::identifier::Identifier;
use crate::model::snapshot::IdentifierSet;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Why a collection is part of a change set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    /// Present in both snapshots; carries the identifiers new in "after"
    Added,
    /// Present only in "before"; carries the whole "before" set
    Vanished,
    /// Present only in "after"; carries the whole "after" set
    Created,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Vanished => "vanished",
            ChangeKind::Created => "created",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifiers recorded for one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionChange {
    pub kind: ChangeKind,
    pub ids: IdentifierSet,
}

impl CollectionChange {
    pub fn new(kind: ChangeKind, ids: IdentifierSet) -> Self {
        Self { kind, ids }
    }
}

/// Collections judged changed between two snapshots
///
/// Never restates an unchanged collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<String, CollectionChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collection change, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, change: CollectionChange) {
        self.changes.insert(name.into(), change);
    }

    pub fn get(&self, name: &str) -> Option<&CollectionChange> {
        self.changes.get(name)
    }

    /// Identifiers recorded for a collection
    pub fn ids(&self, name: &str) -> Option<&IdentifierSet> {
        self.changes.get(name).map(|c| &c.ids)
    }

    /// Whether a specific identifier is recorded for a collection
    pub fn contains(&self, name: &str, id: &Identifier) -> bool {
        self.ids(name).is_some_and(|ids| ids.contains(id))
    }

    /// Iterate changed collections in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, CollectionChange> {
        self.changes.iter()
    }

    /// Number of changed collections
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Total identifiers across all changed collections
    pub fn identifier_count(&self) -> usize {
        self.changes.values().map(|c| c.ids.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a String, &'a CollectionChange);
    type IntoIter = btree_map::Iter<'a, String, CollectionChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_contains_and_counts() {
        let mut changes = ChangeSet::new();
        changes.insert(
            "users",
            CollectionChange::new(
                ChangeKind::Added,
                BTreeSet::from([Identifier::from("a"), Identifier::from("b")]),
            ),
        );
        assert!(changes.contains("users", &Identifier::from("a")));
        assert!(!changes.contains("users", &Identifier::from("c")));
        assert!(!changes.contains("other", &Identifier::from("a")));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.identifier_count(), 2);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ChangeKind::Added.to_string(), "added");
        assert_eq!(ChangeKind::Vanished.to_string(), "vanished");
        assert_eq!(ChangeKind::Created.to_string(), "created");
    }
}
