//! Replay and cleanup script rendering
//!
//! One [`RenderContext`] is built from the change set and the run
//! configuration; every artifact in the [`RENDER_PLAN`] is evaluated against
//! it. Path and body generation are pure, so the complete output set can be
//! checked without touching the filesystem.

pub mod context;
pub mod plan;
pub mod templates;

pub use context::{import_file_name, CollectionEntry, RenderContext, ScriptAuth};
pub use plan::{expand_path, render_plan, ArtifactTemplate, RenderedArtifact, RENDER_PLAN};
