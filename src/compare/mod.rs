//! Snapshot comparator and differ.
//!
//! [`SnapshotComparator::compare`] decides whether a freshly compiled
//! snapshot differs meaningfully from the previous one. The verdict is taken
//! on canonical lines (see [`crate::normalize`]); the diff handed to humans
//! by [`SnapshotComparator::make_diff_text`] is rendered from the raw files,
//! so header and marker churn stays visible there.
//!
//! ```no_run
//! use std::path::Path;
//! use reqsnap::compare::{PreviousSnapshot, SnapshotComparator};
//! use reqsnap::model::{Environment, ProjectContext, DEFAULT_BACKUP_DIR_NAME};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ProjectContext::resolve("/srv/app", Environment::Production, DEFAULT_BACKUP_DIR_NAME)?;
//!     let new = ctx.backup_dir().join("production_2024-06-01T00-00-00.txt");
//!
//!     let mut comparator = SnapshotComparator::new();
//!     if comparator.compare(&new, PreviousSnapshot::Locate, &ctx)? {
//!         println!("{}", comparator.make_diff_text(&ctx));
//!     }
//!     Ok(())
//! }
//! ```

mod unified;

pub use unified::{render_unified_diff, DEFAULT_CONTEXT_LINES};

use crate::error::{ErrorContext, ReqsnapError, Result};
use crate::locate::SnapshotLocator;
use crate::model::ProjectContext;
use crate::normalize::Normalizer;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Label used for the old side of a diff when there was no prior snapshot.
const NO_PREVIOUS_LABEL: &str = "/dev/null";

/// Which snapshot to compare a new one against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousSnapshot {
    /// Resolve the most recent older snapshot from the project's backup directory.
    Locate,
    /// Compare against exactly this file.
    Path(PathBuf),
}

impl PreviousSnapshot {
    /// `Some(path)` means an explicit file, `None` means locate.
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Locate, Self::Path)
    }
}

/// Outcome of comparing two snapshots, retaining the raw texts for diffing.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    new_path: PathBuf,
    old_path: Option<PathBuf>,
    differences_found: bool,
    #[serde(skip)]
    new_text: String,
    #[serde(skip)]
    old_text: String,
}

impl Comparison {
    #[must_use]
    pub const fn differences_found(&self) -> bool {
        self.differences_found
    }

    #[must_use]
    pub fn new_path(&self) -> &Path {
        &self.new_path
    }

    /// The prior snapshot, or `None` when none existed.
    #[must_use]
    pub fn old_path(&self) -> Option<&Path> {
        self.old_path.as_deref()
    }

    /// Unified diff of the raw files; labels are relative to the backup directory.
    #[must_use]
    pub fn diff_text(&self, ctx: &ProjectContext, context_lines: usize) -> String {
        let old_label = self
            .old_path
            .as_deref()
            .map_or_else(|| NO_PREVIOUS_LABEL.to_string(), |p| ctx.display_path(p));
        let new_label = ctx.display_path(&self.new_path);
        render_unified_diff(
            &self.old_text,
            &self.new_text,
            &old_label,
            &new_label,
            context_lines,
        )
    }
}

/// Compares snapshots and remembers the last comparison for diff rendering.
#[derive(Debug, Clone)]
pub struct SnapshotComparator {
    normalizer: Normalizer,
    locator: SnapshotLocator,
    context_lines: usize,
    last: Option<Comparison>,
}

impl Default for SnapshotComparator {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            locator: SnapshotLocator::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
            last: None,
        }
    }
}

impl SnapshotComparator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_locator(mut self, locator: SnapshotLocator) -> Self {
        self.locator = locator;
        self
    }

    #[must_use]
    pub const fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Compare `new` against `previous`, returning `true` when differences
    /// were found.
    ///
    /// With [`PreviousSnapshot::Locate`] and no older snapshot on disk the
    /// verdict is `true`: everything in a first snapshot is new. The result
    /// is kept for [`Self::make_diff_text`]; a failed call clears it.
    pub fn compare(
        &mut self,
        new: &Path,
        previous: PreviousSnapshot,
        ctx: &ProjectContext,
    ) -> Result<bool> {
        self.last = None;
        let comparison = self.compare_files(new, previous, ctx)?;
        let found = comparison.differences_found;
        self.last = Some(comparison);
        Ok(found)
    }

    /// Stateless form of [`Self::compare`].
    pub fn compare_files(
        &self,
        new: &Path,
        previous: PreviousSnapshot,
        ctx: &ProjectContext,
    ) -> Result<Comparison> {
        let old_path = match previous {
            PreviousSnapshot::Path(path) => Some(path),
            PreviousSnapshot::Locate => self
                .locator
                .locate_previous(ctx.backup_dir(), new)
                .context("locating previous snapshot")?,
        };

        let new_text = read_snapshot(new).context("reading new snapshot")?;
        let Some(old_path) = old_path else {
            tracing::info!("No previous snapshot; treating {} as changed", new.display());
            return Ok(Comparison {
                new_path: new.to_path_buf(),
                old_path: None,
                differences_found: true,
                new_text,
                old_text: String::new(),
            });
        };
        let old_text = read_snapshot(&old_path).context("reading previous snapshot")?;
        tracing::debug!(
            "canonicalizing with header rule {} and marker '{}'",
            self.normalizer.header_rule().name(),
            self.normalizer.marker()
        );

        let differences_found = self.normalizer.canonicalize_text(&new_text)
            != self.normalizer.canonicalize_text(&old_text);
        tracing::info!(
            "Compared {} against {}: {}",
            new.display(),
            old_path.display(),
            if differences_found {
                "differences found"
            } else {
                "no differences"
            }
        );

        Ok(Comparison {
            new_path: new.to_path_buf(),
            old_path: Some(old_path),
            differences_found,
            new_text,
            old_text,
        })
    }

    /// The most recent successful comparison, if any.
    #[must_use]
    pub const fn last_comparison(&self) -> Option<&Comparison> {
        self.last.as_ref()
    }

    /// Unified diff of the raw files from the last comparison.
    ///
    /// Returns an empty string when no comparison has been made yet or the
    /// last one found no differences.
    #[must_use]
    pub fn make_diff_text(&self, ctx: &ProjectContext) -> String {
        match &self.last {
            Some(comparison) if comparison.differences_found => {
                comparison.diff_text(ctx, self.context_lines)
            }
            Some(_) => {
                tracing::debug!("make_diff_text called after a comparison without differences");
                String::new()
            }
            None => {
                tracing::debug!("make_diff_text called before any comparison");
                String::new()
            }
        }
    }
}

/// Read a snapshot file in full.
pub fn read_snapshot(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ReqsnapError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Environment;

    fn ctx_for(dir: &Path) -> ProjectContext {
        ProjectContext::with_backup_dir(dir.join("project"), Environment::Local, dir)
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("write snapshot");
        path
    }

    #[test]
    fn test_header_only_difference_is_equal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let new = write(
            dir.path(),
            "local_2024-06-01T00-00-00.txt",
            "# generated 2024-06-01T00:00:00\nrequests==2.31.0\n",
        );
        let old = write(
            dir.path(),
            "local_2024-01-01T00-00-00.txt",
            "# generated 2024-01-01T00:00:00\nrequests==2.31.0\n",
        );

        let ctx = ctx_for(dir.path());
        let mut comparator = SnapshotComparator::new();
        assert!(!comparator
            .compare(&new, PreviousSnapshot::Path(old), &ctx)
            .unwrap());
        assert_eq!(comparator.make_diff_text(&ctx), "");
    }

    #[test]
    fn test_locate_picks_previous_backup() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(
            dir.path(),
            "local_2024-01-01T00-00-00.txt",
            "# generated 2024-01-01T00:00:00\nrequests==2.30.0\n",
        );
        let old = write(
            dir.path(),
            "local_2024-02-01T00-00-00.txt",
            "# ACTIVE\n# generated 2024-02-01T00:00:00\nrequests==2.31.0\n",
        );
        let new = write(
            dir.path(),
            "local_2024-06-01T00-00-00.txt",
            "# generated 2024-06-01T00:00:00\nrequests==2.31.0\n",
        );

        let ctx = ctx_for(dir.path());
        let comparison = SnapshotComparator::new()
            .compare_files(&new, PreviousSnapshot::Locate, &ctx)
            .unwrap();
        assert_eq!(comparison.old_path(), Some(old.as_path()));
        assert!(!comparison.differences_found());
    }

    #[test]
    fn test_no_previous_is_change_and_diff_lists_everything() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let new = write(
            dir.path(),
            "local_2024-06-01T00-00-00.txt",
            "# generated 2024-06-01T00:00:00\nrequests==2.31.0\n",
        );

        let ctx = ctx_for(dir.path());
        let mut comparator = SnapshotComparator::new();
        assert!(comparator.compare(&new, PreviousSnapshot::Locate, &ctx).unwrap());

        let diff = comparator.make_diff_text(&ctx);
        assert!(diff.starts_with("--- /dev/null\n+++ local_2024-06-01T00-00-00.txt\n"));
        assert!(diff.contains("+requests==2.31.0\n"));
    }

    #[test]
    fn test_diff_labels_and_content() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let old = write(
            dir.path(),
            "local_2024-01-01T00-00-00.txt",
            "# generated 2024-01-01T00:00:00\nrequests==2.31.0\n",
        );
        let new = write(
            dir.path(),
            "local_2024-06-01T00-00-00.txt",
            "# generated 2024-06-01T00:00:00\nrequests==2.32.0\n",
        );

        let ctx = ctx_for(dir.path());
        let mut comparator = SnapshotComparator::new();
        assert!(comparator
            .compare(&new, PreviousSnapshot::Path(old), &ctx)
            .unwrap());

        let diff = comparator.make_diff_text(&ctx);
        assert!(diff.starts_with(
            "--- local_2024-01-01T00-00-00.txt\n+++ local_2024-06-01T00-00-00.txt\n"
        ));
        assert!(diff.contains("-requests==2.31.0"));
        assert!(diff.contains("+requests==2.32.0"));
    }

    #[test]
    fn test_diff_before_compare_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let comparator = SnapshotComparator::new();
        assert_eq!(comparator.make_diff_text(&ctx_for(dir.path())), "");
    }

    #[test]
    fn test_missing_explicit_previous_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let new = write(dir.path(), "local_2024-06-01T00-00-00.txt", "a==1\n");
        let missing = dir.path().join("local_2024-01-01T00-00-00.txt");

        let ctx = ctx_for(dir.path());
        let mut comparator = SnapshotComparator::new();
        let err = comparator
            .compare(&new, PreviousSnapshot::Path(missing.clone()), &ctx)
            .unwrap_err();
        assert_eq!(err.path(), Some(missing.as_path()));
        assert!(err.to_string().contains("reading previous snapshot: "));
        assert!(comparator.last_comparison().is_none());
    }

    #[test]
    fn test_failed_compare_clears_previous_result() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let old = write(dir.path(), "local_2024-01-01T00-00-00.txt", "a==1\n");
        let new = write(dir.path(), "local_2024-06-01T00-00-00.txt", "a==2\n");
        let ctx = ctx_for(dir.path());

        let mut comparator = SnapshotComparator::new();
        assert!(comparator
            .compare(&new, PreviousSnapshot::Path(old), &ctx)
            .unwrap());
        assert!(!comparator.make_diff_text(&ctx).is_empty());

        let gone = dir.path().join("local_2024-07-01T00-00-00.txt");
        assert!(comparator
            .compare(&gone, PreviousSnapshot::Path(new), &ctx)
            .is_err());
        assert_eq!(comparator.make_diff_text(&ctx), "");
    }

    #[test]
    fn test_compare_does_not_modify_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let old_content = "# ACTIVE\n# generated 2024-01-01T00:00:00\na==1\n";
        let old = write(dir.path(), "local_2024-01-01T00-00-00.txt", old_content);
        let new = write(dir.path(), "local_2024-06-01T00-00-00.txt", "a==2\n");
        let ctx = ctx_for(dir.path());

        let mut comparator = SnapshotComparator::new();
        comparator
            .compare(&new, PreviousSnapshot::Path(old.clone()), &ctx)
            .unwrap();
        let _ = comparator.make_diff_text(&ctx);

        assert_eq!(std::fs::read_to_string(&old).unwrap(), old_content);
        assert_eq!(std::fs::read_to_string(&new).unwrap(), "a==2\n");
    }

    #[test]
    fn test_previous_snapshot_from_option() {
        assert_eq!(PreviousSnapshot::from_option(None), PreviousSnapshot::Locate);
        assert_eq!(
            PreviousSnapshot::from_option(Some(PathBuf::from("x.txt"))),
            PreviousSnapshot::Path(PathBuf::from("x.txt"))
        );
    }
}
