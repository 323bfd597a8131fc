//! Artifact emission
//!
//! Turns a change set into replay artifacts: one import file per changed
//! collection plus the scripts of the [`RENDER_PLAN`]. Every document body
//! is fetched and every file rendered in memory before anything is written,
//! so a missing document or a render failure leaves the output directory
//! untouched.

pub mod atomic;

use crate::config::RunConfig;
use crate::errors::{DiffError, Result};
use crate::model::{ChangeSet, IdentifierSet};
use crate::render::{render_plan, RenderContext, RenderedArtifact, RENDER_PLAN};
use crate::source::DocumentSource;
use crate::{log_op_end, log_op_error, log_op_start};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of a successful emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// Files written, import files first, then scripts
    pub written: Vec<PathBuf>,
    pub document_count: usize,
}

/// Fetch changed documents and write all replay artifacts under `out_dir`
///
/// Running twice against an unchanged database yields byte-identical files.
///
/// # Errors
///
/// - `DocumentMissing` when a changed identifier no longer resolves; this
///   includes every identifier of a vanished collection
/// - `Read` when a lookup fails
/// - `Render` / `Serialization` when an artifact cannot be produced
/// - `Io` when a file cannot be written
pub fn emit<S>(
    source: &S,
    changes: &ChangeSet,
    config: &RunConfig,
    out_dir: &Path,
) -> Result<EmitReport>
where
    S: DocumentSource + ?Sized,
{
    let start = Instant::now();
    log_op_start!("emit_artifacts", collection_count = changes.len() as u64);

    match prepare(source, changes, config).and_then(|(artifacts, document_count)| {
        let written = atomic::write_all(out_dir, &artifacts)?;
        Ok(EmitReport {
            written,
            document_count,
        })
    }) {
        Ok(report) => {
            log_op_end!(
                "emit_artifacts",
                duration_ms = start.elapsed().as_millis() as u64,
                artifact_count = report.written.len() as u64,
                identifier_count = report.document_count as u64
            );
            Ok(report)
        }
        Err(err) => {
            log_op_error!(
                "emit_artifacts",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Render every artifact in memory
fn prepare<S>(
    source: &S,
    changes: &ChangeSet,
    config: &RunConfig,
) -> Result<(Vec<RenderedArtifact>, usize)>
where
    S: DocumentSource + ?Sized,
{
    let ctx = RenderContext::new(config, changes)?;
    let mut artifacts = Vec::with_capacity(ctx.collections.len() + RENDER_PLAN.len());
    let mut document_count = 0;

    for (entry, (name, change)) in ctx.collections.iter().zip(changes.iter()) {
        artifacts.push(RenderedArtifact {
            path: entry.import_file.clone(),
            body: dump_collection(source, name, &change.ids)?,
            mode: crate::render::plan::MODE_PRIVATE,
        });
        document_count += change.ids.len();
    }

    artifacts.extend(render_plan(RENDER_PLAN, &ctx)?);
    Ok((artifacts, document_count))
}

/// One compact JSON document per line, in identifier order
fn dump_collection<S>(source: &S, collection: &str, ids: &IdentifierSet) -> Result<String>
where
    S: DocumentSource + ?Sized,
{
    let mut out = String::new();
    for id in ids {
        let document = source
            .fetch_document(collection, id)?
            .ok_or_else(|| DiffError::DocumentMissing {
                collection: collection.to_string(),
                identifier: id.canonical(),
            })?;
        let line = serde_json::to_string(&document).map_err(|e| DiffError::Serialization {
            message: e.to_string(),
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
