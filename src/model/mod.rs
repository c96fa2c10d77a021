//! Data model for requirements snapshots.
//!
//! A snapshot is identified by its file name, which carries an environment
//! tag and a generation timestamp. [`ProjectContext`] ties a project root to
//! the backup directory holding its snapshots.

mod project;
mod snapshot;

pub use project::{Environment, ProjectContext, DEFAULT_BACKUP_DIR_NAME};
pub use snapshot::{SnapshotName, DEFAULT_EXTENSION, TIMESTAMP_FORMAT};
