//! Backup directory housekeeping.
//!
//! Naming of new snapshots, retention of the most recent ones, and marking
//! an accepted snapshot as active. None of this runs during a comparison;
//! the update flow calls these around it.

use crate::error::{ReqsnapError, Result};
use crate::locate::SnapshotLocator;
use crate::model::{ProjectContext, SnapshotName};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Default number of snapshots kept by [`prune_backups`].
pub const DEFAULT_KEEP_RECENT: usize = 30;

/// Path for a snapshot compiled at `now`, inside the context's backup directory.
#[must_use]
pub fn snapshot_path(ctx: &ProjectContext, now: NaiveDateTime, extension: &str) -> PathBuf {
    let name = SnapshotName::new(ctx.environment().as_str(), now, extension);
    ctx.backup_dir().join(name.file_name())
}

/// Create the backup directory if needed.
pub fn ensure_backup_dir(ctx: &ProjectContext) -> Result<()> {
    std::fs::create_dir_all(ctx.backup_dir()).map_err(|e| ReqsnapError::io(ctx.backup_dir(), e))
}

/// Delete all but the `keep_recent` newest snapshots, returning the removed paths.
///
/// Age comes from the file-name timestamp. Files that are not well-named
/// snapshots are left alone.
pub fn prune_backups(
    locator: &SnapshotLocator,
    backup_dir: &Path,
    keep_recent: usize,
) -> Result<Vec<PathBuf>> {
    let snapshots = locator.list(backup_dir)?;
    let excess = snapshots.len().saturating_sub(keep_recent);

    let mut removed = Vec::with_capacity(excess);
    for entry in snapshots.into_iter().take(excess) {
        tracing::debug!("removing old backup: {}", entry.path.display());
        std::fs::remove_file(&entry.path).map_err(|e| ReqsnapError::io(&entry.path, e))?;
        removed.push(entry.path);
    }

    if !removed.is_empty() {
        tracing::info!(
            "Removed {} old backup(s) from {}",
            removed.len(),
            backup_dir.display()
        );
    }
    Ok(removed)
}

/// Prepend `marker` to an accepted snapshot.
///
/// Returns `false` without touching the file when its first line already is
/// the marker. Pass the marker the comparator strips, normally
/// [`ACTIVE_MARKER`](crate::normalize::ACTIVE_MARKER).
pub fn mark_active(snapshot: &Path, marker: &str) -> Result<bool> {
    let content = std::fs::read_to_string(snapshot).map_err(|e| ReqsnapError::io(snapshot, e))?;
    if content.lines().next() == Some(marker) {
        tracing::debug!("{} already marked active", snapshot.display());
        return Ok(false);
    }

    let marked = format!("{marker}\n{content}");
    std::fs::write(snapshot, marked).map_err(|e| ReqsnapError::io(snapshot, e))?;
    tracing::info!("Marked {} as active", snapshot.display());
    Ok(true)
}
