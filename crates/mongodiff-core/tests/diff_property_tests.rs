#![allow(clippy::unwrap_used, clippy::expect_used)]

use mongodiff_core::{compute_changes, ChangeKind, Identifier, IdentifierSet, Snapshot};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn arb_identifier() -> impl Strategy<Value = Identifier> {
    prop_oneof![
        "[a-e]{1,2}".prop_map(Identifier::from),
        any::<[u8; 12]>().prop_map(Identifier::from),
    ]
}

fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
    prop::collection::btree_map(
        "(users|orders|logs|temp)",
        prop::collection::btree_set(arb_identifier(), 0..6),
        0..4,
    )
    .prop_map(|collections: BTreeMap<String, BTreeSet<Identifier>>| {
        collections.into_iter().collect()
    })
}

proptest! {
    #[test]
    fn prop_reported_ids_exist_in_exactly_one_snapshot_side(
        before in arb_snapshot(),
        after in arb_snapshot(),
    ) {
        let changes = compute_changes(&before, &after);
        let empty = IdentifierSet::new();

        for (name, change) in &changes {
            let before_ids = before.get(name).unwrap_or(&empty);
            let after_ids = after.get(name).unwrap_or(&empty);
            prop_assert!(!change.ids.is_empty() || change.kind == ChangeKind::Vanished);
            match change.kind {
                ChangeKind::Added => {
                    prop_assert!(change.ids.is_subset(after_ids));
                    prop_assert!(change.ids.is_disjoint(before_ids));
                }
                ChangeKind::Created => {
                    prop_assert!(!before.contains_collection(name));
                    prop_assert_eq!(&change.ids, after_ids);
                }
                ChangeKind::Vanished => {
                    prop_assert!(!after.contains_collection(name));
                    prop_assert_eq!(&change.ids, before_ids);
                }
            }
        }
    }

    #[test]
    fn prop_every_new_identifier_is_reported(
        before in arb_snapshot(),
        after in arb_snapshot(),
    ) {
        let changes = compute_changes(&before, &after);
        for (name, after_ids) in &after {
            let new_ids: IdentifierSet = match before.get(name) {
                Some(before_ids) => after_ids.difference(before_ids).cloned().collect(),
                None => after_ids.clone(),
            };
            for id in &new_ids {
                prop_assert!(changes.contains(name, id));
            }
        }
    }

    #[test]
    fn prop_identical_snapshots_have_no_changes(snapshot in arb_snapshot()) {
        prop_assert!(compute_changes(&snapshot, &snapshot).is_empty());
    }
}
