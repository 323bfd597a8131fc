//! Change computation between two snapshots.

use crate::model::{ChangeKind, ChangeSet, CollectionChange, IdentifierSet, Snapshot};
use crate::{log_op_end, log_op_start};
use std::time::Instant;

/// Compute the change set from `before` to `after`
///
/// Two passes:
/// 1. every collection of `before`: vanished collections contribute their
///    whole set, surviving ones contribute `after − before` when non-empty;
/// 2. every collection only in `after` contributes its whole set when
///    non-empty.
///
/// Identifier equality is the variant's native equality; nothing is
/// normalised.
pub fn compute_changes(before: &Snapshot, after: &Snapshot) -> ChangeSet {
    let start = Instant::now();
    log_op_start!(
        "diff_snapshots",
        before_collections = before.len() as u64,
        after_collections = after.len() as u64
    );

    let mut changes = ChangeSet::new();

    for (name, known) in before {
        match after.get(name) {
            None => {
                changes.insert(
                    name.clone(),
                    CollectionChange::new(ChangeKind::Vanished, known.clone()),
                );
            }
            Some(current) => {
                let added: IdentifierSet = current.difference(known).cloned().collect();
                if !added.is_empty() {
                    changes.insert(name.clone(), CollectionChange::new(ChangeKind::Added, added));
                }
            }
        }
    }

    for (name, current) in after {
        if !before.contains_collection(name) && !current.is_empty() {
            changes.insert(
                name.clone(),
                CollectionChange::new(ChangeKind::Created, current.clone()),
            );
        }
    }

    log_op_end!(
        "diff_snapshots",
        duration_ms = start.elapsed().as_millis() as u64,
        collection_count = changes.len() as u64,
        identifier_count = changes.identifier_count() as u64
    );
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Identifier;

    fn id(s: &str) -> Identifier {
        Identifier::from(s)
    }

    fn snap(entries: Vec<(&str, Vec<&str>)>) -> Snapshot {
        entries
            .into_iter()
            .map(|(name, ids)| (name, ids.into_iter().map(id).collect::<Vec<_>>()))
            .collect()
    }

    #[test]
    fn test_added_identifier_in_existing_collection() {
        let before = snap(vec![("users", vec!["id1"])]);
        let after = snap(vec![("users", vec!["id1", "id2"])]);
        let changes = compute_changes(&before, &after);

        assert_eq!(changes.len(), 1);
        let users = changes.get("users").unwrap();
        assert_eq!(users.kind, ChangeKind::Added);
        assert_eq!(users.ids, IdentifierSet::from([id("id2")]));
    }

    #[test]
    fn test_removed_identifier_is_not_a_change() {
        let before = snap(vec![("users", vec!["id1", "id2"])]);
        let after = snap(vec![("users", vec!["id1"])]);
        assert!(compute_changes(&before, &after).is_empty());
    }

    #[test]
    fn test_vanished_collection_captures_whole_before_set() {
        let before = snap(vec![("temp", vec!["id3"]), ("users", vec!["id1"])]);
        let after = snap(vec![("users", vec!["id1"])]);
        let changes = compute_changes(&before, &after);

        let temp = changes.get("temp").unwrap();
        assert_eq!(temp.kind, ChangeKind::Vanished);
        assert_eq!(temp.ids, IdentifierSet::from([id("id3")]));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_vanished_empty_collection_is_still_recorded() {
        let before = snap(vec![("scratch", vec![])]);
        let after = Snapshot::new();
        let changes = compute_changes(&before, &after);
        assert_eq!(changes.get("scratch").unwrap().kind, ChangeKind::Vanished);
        assert_eq!(changes.identifier_count(), 0);
    }

    #[test]
    fn test_new_collection_exports_all_identifiers() {
        let before = Snapshot::new();
        let after = snap(vec![("users", vec!["id4", "id5"])]);
        let changes = compute_changes(&before, &after);

        let users = changes.get("users").unwrap();
        assert_eq!(users.kind, ChangeKind::Created);
        assert_eq!(users.ids, IdentifierSet::from([id("id4"), id("id5")]));
    }

    #[test]
    fn test_new_empty_collection_is_omitted() {
        let before = Snapshot::new();
        let after = snap(vec![("users", vec![])]);
        assert!(compute_changes(&before, &after).is_empty());
    }

    #[test]
    fn test_object_id_and_string_with_same_rendering_differ() {
        let hex = "501ca04b668d67b3d6489f3a";
        let mut before = Snapshot::new();
        before.insert_collection("mixed", IdentifierSet::from([Identifier::from(hex)]));
        let mut after = Snapshot::new();
        after.insert_collection(
            "mixed",
            IdentifierSet::from([
                Identifier::from(hex),
                Identifier::object_id_from_hex(hex).unwrap(),
            ]),
        );

        let changes = compute_changes(&before, &after);
        assert_eq!(
            changes.ids("mixed").unwrap(),
            &IdentifierSet::from([Identifier::object_id_from_hex(hex).unwrap()])
        );
    }
}
