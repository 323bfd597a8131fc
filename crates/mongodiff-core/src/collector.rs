//! Snapshot collection
//!
//! Walks every non-excluded collection and records the `_id` of each
//! document. There is no partial-result contract: the first listing or
//! cursor failure aborts the whole snapshot, because a diff against an
//! incomplete snapshot would report phantom changes.

use crate::config::ExcludeList;
use crate::diff::compute_changes;
use crate::errors::Result;
use crate::model::{ChangeSet, IdentifierSet, Snapshot};
use crate::source::DocumentSource;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Take one identifier snapshot of the source's database
///
/// Empty collections are kept as empty sets so that a later disappearance
/// is still detected.
///
/// # Errors
///
/// - `Connectivity`: collection names could not be listed
/// - `Read`: a cursor failed while iterating
/// - `UnsupportedIdentifier` / `MissingIdentifier`: an `_id` cannot be modelled
pub fn collect<S>(source: &S, excludes: &ExcludeList) -> Result<Snapshot>
where
    S: DocumentSource + ?Sized,
{
    let start = Instant::now();
    log_op_start!("collect_snapshot", database = source.database_name());

    match collect_all(source, excludes) {
        Ok(snapshot) => {
            log_op_end!(
                "collect_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                collection_count = snapshot.len() as u64,
                identifier_count = snapshot.identifier_count() as u64
            );
            Ok(snapshot)
        }
        Err(err) => {
            log_op_error!(
                "collect_snapshot",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn collect_all<S>(source: &S, excludes: &ExcludeList) -> Result<Snapshot>
where
    S: DocumentSource + ?Sized,
{
    let mut snapshot = Snapshot::new();
    for name in source.list_collection_names()? {
        if excludes.contains(&name) {
            tracing::debug!(collection = %name, "skipping excluded collection");
            continue;
        }
        let mut ids = IdentifierSet::new();
        for id in source.identifiers(&name)? {
            ids.insert(id?);
        }
        tracing::debug!(collection = %name, identifier_count = ids.len() as u64, "collected");
        snapshot.insert_collection(name, ids);
    }
    Ok(snapshot)
}

/// Collect, pause, collect again and diff
///
/// `pause` runs between the two snapshots; it is where the operator makes
/// the manual change. An error from `pause` aborts before the second read.
///
/// # Errors
///
/// Anything [`collect`] or `pause` returns.
pub fn capture_changes<S, P>(source: &S, excludes: &ExcludeList, pause: P) -> Result<ChangeSet>
where
    S: DocumentSource + ?Sized,
    P: FnOnce() -> Result<()>,
{
    let before = collect(source, excludes)?;
    pause()?;
    let after = collect(source, excludes)?;
    Ok(compute_changes(&before, &after))
}
