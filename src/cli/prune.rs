//! Prune command handler.

use super::ensure_valid;
use crate::backup::prune_backups;
use crate::config::PruneConfig;
use anyhow::Result;
use std::path::PathBuf;

/// Remove all but the newest snapshots, returning the removed paths.
pub fn run_prune(config: PruneConfig) -> Result<Vec<PathBuf>> {
    let mut app = config.app;
    if let Some(keep) = config.keep_recent {
        app.backups.keep_recent = keep;
    }
    ensure_valid(&app)?;

    let ctx = app.project_context(&config.project_root, None)?;
    if !ctx.backup_dir().is_dir() {
        tracing::info!("No backup directory at {}", ctx.backup_dir().display());
        return Ok(Vec::new());
    }
    Ok(prune_backups(
        &app.locator(),
        ctx.backup_dir(),
        app.backups.keep_recent,
    )?)
}
