//! Mark-active command handler.

use super::ensure_valid;
use crate::backup::mark_active;
use crate::config::AppConfig;
use crate::model::SnapshotName;
use anyhow::Result;
use std::path::Path;

/// Prepend the configured active marker to `snapshot`.
///
/// The file name must be a well-formed snapshot name so that stray files
/// are never marked by accident. Returns `false` when already marked.
pub fn run_mark_active(snapshot: &Path, app: &AppConfig) -> Result<bool> {
    ensure_valid(app)?;
    let name = SnapshotName::from_path(snapshot, &app.backups.extension)?;
    // Same marker the comparator strips.
    let normalizer = app.normalizer()?;
    tracing::debug!(
        "marking {} ({}) with '{}'",
        name,
        name.environment(),
        normalizer.marker()
    );
    Ok(mark_active(snapshot, normalizer.marker())?)
}
