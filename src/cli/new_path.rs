//! New-path command handler.

use super::ensure_valid;
use crate::backup::{ensure_backup_dir, snapshot_path};
use crate::config::AppConfig;
use crate::model::Environment;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Path a snapshot compiled at `now` should be written to.
///
/// Creates the backup directory when `create_dir` is set.
pub fn run_new_path(
    project_root: &Path,
    environment: Option<Environment>,
    now: NaiveDateTime,
    create_dir: bool,
    app: &AppConfig,
) -> Result<PathBuf> {
    ensure_valid(app)?;
    let ctx = app.project_context(project_root, environment)?;
    if create_dir {
        ensure_backup_dir(&ctx)?;
    }
    Ok(snapshot_path(&ctx, now, &app.backups.extension))
}
