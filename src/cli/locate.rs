//! Locate command handler.

use super::ensure_valid;
use crate::config::AppConfig;
use crate::model::Environment;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Find the snapshot preceding `new` in the project's backup directory.
///
/// `Ok(None)` means there is no earlier snapshot, which is not an error.
pub fn run_locate(
    new: &Path,
    project_root: &Path,
    environment: Option<Environment>,
    app: &AppConfig,
) -> Result<Option<PathBuf>> {
    ensure_valid(app)?;
    let ctx = app.project_context(project_root, environment)?;
    Ok(app.locator().locate_previous(ctx.backup_dir(), new)?)
}
