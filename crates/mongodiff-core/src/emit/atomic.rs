//! Staged write primitives
//!
//! Every file is first written to a `.tmp` sibling; targets are only
//! replaced once all siblings exist. Targets that already existed are moved
//! to a `.bak` sibling while the set is swapped in and restored if a later
//! rename fails, so a failed run leaves the previous set in place.

use crate::errors::{io_error, Result};
use crate::render::RenderedArtifact;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn sibling(target: &Path, suffix: &str) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    target.with_file_name(name)
}

/// Sibling path a target is staged under before the rename
pub fn staging_path(target: &Path) -> PathBuf {
    sibling(target, ".tmp")
}

/// Sibling path an existing target is kept under while the set is swapped in
pub fn backup_path(target: &Path) -> PathBuf {
    sibling(target, ".bak")
}

/// Write every artifact under `dir`, all or nothing
///
/// Returns the target paths in artifact order.
///
/// # Errors
///
/// `Io` when a staged file cannot be created, written or renamed. Staged
/// files are removed and targets already replaced are restored before
/// returning.
pub fn write_all(dir: &Path, artifacts: &[RenderedArtifact]) -> Result<Vec<PathBuf>> {
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let target = dir.join(&artifact.path);
        let temp = staging_path(&target);
        if let Err(err) = stage(&temp, artifact) {
            let _ = fs::remove_file(&temp);
            discard(&staged);
            return Err(err);
        }
        staged.push((temp, target));
    }

    let mut swapped: Vec<(&Path, Option<PathBuf>)> = Vec::with_capacity(staged.len());
    for (index, (temp, target)) in staged.iter().enumerate() {
        match swap_in(temp, target) {
            Ok(backup) => swapped.push((target.as_path(), backup)),
            Err(err) => {
                roll_back(&swapped);
                discard(&staged[index..]);
                return Err(err);
            }
        }
    }
    for backup in swapped.iter().filter_map(|(_, backup)| backup.as_ref()) {
        let _ = fs::remove_file(backup);
    }

    Ok(staged.into_iter().map(|(_, target)| target).collect())
}

/// Rename `temp` over `target`, keeping any previous target as a backup
fn swap_in(temp: &Path, target: &Path) -> Result<Option<PathBuf>> {
    let backup = if target.symlink_metadata().is_ok() {
        let backup = backup_path(target);
        fs::rename(target, &backup).map_err(|e| io_error("write_artifacts", target, e))?;
        Some(backup)
    } else {
        None
    };
    if let Err(err) = fs::rename(temp, target) {
        if let Some(backup) = &backup {
            let _ = fs::rename(backup, target);
        }
        return Err(io_error("write_artifacts", target, err));
    }
    Ok(backup)
}

fn roll_back(swapped: &[(&Path, Option<PathBuf>)]) {
    for (target, backup) in swapped.iter().rev() {
        let restored = match backup {
            Some(backup) => fs::rename(backup, target),
            None => fs::remove_file(target),
        };
        if let Err(err) = restored {
            tracing::warn!(path = %target.display(), error = %err, "could not restore previous file");
        }
    }
}

fn stage(temp: &Path, artifact: &RenderedArtifact) -> Result<()> {
    if let Some(parent) = temp.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }
    let mut file = File::create(temp).map_err(|e| io_error("write_artifacts", temp, e))?;
    file.write_all(artifact.body.as_bytes())
        .and_then(|()| file.sync_all())
        .map_err(|e| io_error("write_artifacts", temp, e))?;
    if let Err(err) = set_mode(&file, artifact.mode) {
        tracing::warn!(path = %temp.display(), error = %err, "could not set file permissions");
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (temp, _) in staged {
        let _ = fs::remove_file(temp);
    }
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
