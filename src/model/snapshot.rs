//! Typed snapshot file names.
//!
//! Backups are named `{env}_{YYYY-MM-DDTHH-MM-SS}.{ext}`. The timestamp in
//! the name is what orders snapshots; file mtimes are never consulted since
//! copies and restores rewrite them.

use crate::error::{ReqsnapError, Result};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// `strftime` format of the timestamp embedded in snapshot file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Default manifest extension for snapshot files.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Parsed snapshot file name: environment tag plus embedded timestamp.
///
/// Ordering is chronological; identical timestamps fall back to the file
/// name so that ranking stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotName {
    environment: String,
    timestamp: NaiveDateTime,
    file_name: String,
}

impl SnapshotName {
    /// Build the name for a new snapshot.
    #[must_use]
    pub fn new(environment: impl Into<String>, timestamp: NaiveDateTime, extension: &str) -> Self {
        let environment = environment.into();
        // Sub-second precision is not representable in the name.
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        let file_name = format!(
            "{environment}_{}.{extension}",
            timestamp.format(TIMESTAMP_FORMAT)
        );
        Self {
            environment,
            timestamp,
            file_name,
        }
    }

    /// Parse a bare file name such as `local_2024-01-01T00-00-00.txt`.
    pub fn parse(file_name: &str, extension: &str) -> Result<Self> {
        let suffix = format!(".{extension}");
        let stem = file_name.strip_suffix(&suffix).ok_or_else(|| {
            ReqsnapError::invalid_name(file_name, format!("expected '{suffix}' extension"))
        })?;

        let (environment, raw_timestamp) = stem.rsplit_once('_').ok_or_else(|| {
            ReqsnapError::invalid_name(file_name, "missing '_' between environment and timestamp")
        })?;
        if environment.is_empty() {
            return Err(ReqsnapError::invalid_name(file_name, "empty environment tag"));
        }

        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| {
                ReqsnapError::invalid_name(
                    file_name,
                    format!("timestamp '{raw_timestamp}' is not YYYY-MM-DDTHH-MM-SS ({e})"),
                )
            })?;

        Ok(Self {
            environment: environment.to_string(),
            timestamp,
            file_name: file_name.to_string(),
        })
    }

    /// Parse the file-name component of a path.
    pub fn from_path(path: &Path, extension: &str) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ReqsnapError::invalid_name(path.display().to_string(), "no UTF-8 file name")
            })?;
        Self::parse(file_name, extension)
    }

    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Ord for SnapshotName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

impl PartialOrd for SnapshotName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}
