//! Snapshot diff engine.
//!
//! Reduces a "before" and an "after" snapshot to the identifiers worth
//! replaying, and renders that change set for the operator.
//!
//! ## Entry point
//!
//! ```
//! use mongodiff_core::diff::compute_changes;
//! use mongodiff_core::model::{Identifier, Snapshot};
//!
//! let before: Snapshot = [("users", vec![Identifier::from("id1")])].into_iter().collect();
//! let after: Snapshot = [("users", vec![Identifier::from("id1"), Identifier::from("id2")])]
//!     .into_iter()
//!     .collect();
//!
//! let changes = compute_changes(&before, &after);
//! assert!(changes.contains("users", &Identifier::from("id2")));
//! assert_eq!(changes.identifier_count(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **One-directional**: for a collection in both snapshots only `after − before`
//!   is recorded; deletions inside a surviving collection are not changes.
//! - **Vanished capture**: a collection missing from "after" contributes its whole
//!   "before" set.
//! - **Created capture**: a collection missing from "before" contributes its whole
//!   "after" set.
//! - **Determinism**: output order is a function of content only.

pub mod engine;
pub mod formatter;
pub mod human_summary;

pub use engine::compute_changes;
pub use formatter::{AnsiFormatter, Formatter, PlainFormatter, Style};
pub use human_summary::render_change_report;
