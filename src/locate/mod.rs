//! Snapshot locator.
//!
//! Finds the snapshot that precedes a newly compiled one inside a backup
//! directory. Ranking uses the timestamp embedded in each file name; files
//! whose names do not parse are skipped so that stray files in the
//! directory never abort a run.

use crate::error::{ReqsnapError, Result};
use crate::model::{SnapshotName, DEFAULT_EXTENSION};
use std::path::{Path, PathBuf};

/// A snapshot file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub name: SnapshotName,
    pub path: PathBuf,
}

/// Scans backup directories for snapshot files with a given extension.
#[derive(Debug, Clone)]
pub struct SnapshotLocator {
    extension: String,
}

impl Default for SnapshotLocator {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

impl SnapshotLocator {
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// List all well-named snapshots in `backup_dir`, oldest first.
    ///
    /// Files with the right extension but an unparseable name are logged and
    /// skipped. A missing or unreadable directory is an error.
    pub fn list(&self, backup_dir: &Path) -> Result<Vec<SnapshotEntry>> {
        let entries =
            std::fs::read_dir(backup_dir).map_err(|e| ReqsnapError::io(backup_dir, e))?;

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReqsnapError::io(backup_dir, e))?;
            let path = entry.path();
            if !path.is_file() || !self.has_extension(&path) {
                continue;
            }
            match SnapshotName::from_path(&path, &self.extension) {
                Ok(name) => snapshots.push(SnapshotEntry { name, path }),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        snapshots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snapshots)
    }

    /// Find the most recent snapshot strictly older than `newer`.
    ///
    /// Returns `Ok(None)` when there is nothing to compare against, which is
    /// the normal outcome of a project's first run. `newer` itself never
    /// matches, and neither does any file with the same or a later
    /// timestamp. Identical timestamps resolve to the greater file name.
    pub fn locate_previous(&self, backup_dir: &Path, newer: &Path) -> Result<Option<PathBuf>> {
        let newer_name = SnapshotName::from_path(newer, &self.extension)?;
        tracing::debug!(
            "locating snapshot before {} in {}",
            newer_name,
            backup_dir.display()
        );

        let previous = self
            .list(backup_dir)?
            .into_iter()
            .filter(|entry| entry.path != newer && entry.name.timestamp() < newer_name.timestamp())
            .max_by(|a, b| a.name.cmp(&b.name));

        match &previous {
            Some(entry) => tracing::debug!("previous snapshot: {}", entry.path.display()),
            None => tracing::info!("No previous snapshot in {}", backup_dir.display()),
        }

        Ok(previous.map(|entry| entry.path))
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

/// Locate the previous snapshot using the default `txt` extension.
pub fn locate_previous(backup_dir: &Path, newer: &Path) -> Result<Option<PathBuf>> {
    SnapshotLocator::default().locate_previous(backup_dir, newer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "requests==2.31.0\n").expect("write snapshot");
        path
    }

    #[test]
    fn test_empty_dir_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let newer = dir.path().join("local_2024-06-01T00-00-00.txt");
        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), None);
    }

    #[test]
    fn test_missing_dir_is_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("nope");
        let newer = missing.join("local_2024-06-01T00-00-00.txt");
        let err = locate_previous(&missing, &newer).unwrap_err();
        assert!(matches!(err, ReqsnapError::Io { .. }));
    }

    #[test]
    fn test_only_newer_present_is_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");
        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), None);
    }

    #[test]
    fn test_picks_greatest_older_timestamp() {
        let dir = tempfile::tempdir().expect("create temp dir");
        touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        let expected = touch(dir.path(), "local_2024-05-31T23-59-59.txt");
        touch(dir.path(), "local_2024-03-15T12-00-00.txt");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");

        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), Some(expected));
    }

    #[test]
    fn test_ignores_later_snapshots() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let expected = touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        touch(dir.path(), "local_2024-09-01T00-00-00.txt");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");

        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), Some(expected));
    }

    #[test]
    fn test_ranks_by_timestamp_not_file_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        // Lexicographically "staging_..." > "local_...", chronologically older.
        touch(dir.path(), "staging_2024-01-01T00-00-00.txt");
        let expected = touch(dir.path(), "local_2024-02-01T00-00-00.txt");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");

        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), Some(expected));
    }

    #[test]
    fn test_identical_timestamps_prefer_greater_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        let expected = touch(dir.path(), "staging_2024-01-01T00-00-00.txt");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");

        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), Some(expected));
    }

    #[test]
    fn test_skips_malformed_and_foreign_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let expected = touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "local_2024-13-01T00-00-00.txt");
        touch(dir.path(), "local_2024-05-01T00-00-00.in");
        std::fs::create_dir(dir.path().join("local_2024-05-02T00-00-00.txt")).expect("mkdir");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.txt");

        assert_eq!(locate_previous(dir.path(), &newer).unwrap(), Some(expected));
    }

    #[test]
    fn test_newer_with_bad_name_is_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        let newer = touch(dir.path(), "requirements.txt");
        let err = locate_previous(dir.path(), &newer).unwrap_err();
        assert!(matches!(err, ReqsnapError::InvalidSnapshotName { .. }));
    }

    #[test]
    fn test_list_sorted_oldest_first() {
        let dir = tempfile::tempdir().expect("create temp dir");
        touch(dir.path(), "local_2024-03-01T00-00-00.txt");
        touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        touch(dir.path(), "local_2024-02-01T00-00-00.txt");

        let names: Vec<_> = SnapshotLocator::default()
            .list(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name.file_name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "local_2024-01-01T00-00-00.txt",
                "local_2024-02-01T00-00-00.txt",
                "local_2024-03-01T00-00-00.txt",
            ]
        );
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().expect("create temp dir");
        touch(dir.path(), "local_2024-01-01T00-00-00.txt");
        let expected = touch(dir.path(), "local_2024-02-01T00-00-00.lock");
        let newer = touch(dir.path(), "local_2024-06-01T00-00-00.lock");

        let locator = SnapshotLocator::new("lock");
        assert_eq!(
            locator.locate_previous(dir.path(), &newer).unwrap(),
            Some(expected)
        );
    }
}
