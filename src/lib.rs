//! **Decide whether a recompiled requirements lock file actually changed.**
//!
//! `reqsnap` keeps timestamped snapshots of compiled dependency manifests
//! (the output of `uv pip compile` or `pip-compile`) in a backup directory
//! next to a project, and answers one question about each new snapshot: does
//! it differ *meaningfully* from the previous one? Compiler header lines carry
//! a generation timestamp and the accepted snapshot carries an `# ACTIVE`
//! marker; neither counts as a change. When something did change, a unified
//! diff of the raw files is available for the humans reviewing it.
//!
//! ## Core Concepts & Modules
//!
//! - **[`locate`]**: [`SnapshotLocator`] finds the snapshot preceding a new
//!   one, ranked by the timestamp embedded in each file name.
//! - **[`normalize`]**: [`Normalizer`] strips non-semantic lines, producing
//!   the canonical line sequence used for equality.
//! - **[`compare`]**: [`SnapshotComparator`] takes the verdict and renders the diff.
//! - **[`model`]**: [`SnapshotName`], [`Environment`] and [`ProjectContext`].
//! - **[`backup`]**: snapshot naming, retention and active marking.
//! - **[`config`]**: `.reqsnap.yaml` loading, discovery and validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use reqsnap::{Environment, PreviousSnapshot, ProjectContext, SnapshotComparator};
//! use reqsnap::model::DEFAULT_BACKUP_DIR_NAME;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = ProjectContext::resolve("/srv/site", Environment::Production, DEFAULT_BACKUP_DIR_NAME)?;
//!     let new = ctx.backup_dir().join("production_2024-06-01T03-00-00.txt");
//!
//!     let mut comparator = SnapshotComparator::new();
//!     if comparator.compare(&new, PreviousSnapshot::Locate, &ctx)? {
//!         print!("{}", comparator.make_diff_text(&ctx));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Canonicalization Only
//!
//! ```
//! use reqsnap::Normalizer;
//!
//! let old = "# ACTIVE\n# generated 2024-01-01T00:00:00\nrequests==2.32.0\n";
//! let new = "# generated 2024-02-01T00:00:00\nrequests==2.32.0\n";
//!
//! let normalizer = Normalizer::new();
//! assert_eq!(normalizer.canonicalize_text(old), normalizer.canonicalize_text(new));
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `reqsnap` binary wraps these operations as subcommands (`compare`,
//! `diff`, `locate`, `new-path`, `prune`, `mark-active`) with CI-friendly
//! exit codes; see `reqsnap --help`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod backup;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod normalize;
pub mod pipeline;

// Re-export main types for convenience
pub use compare::{Comparison, PreviousSnapshot, SnapshotComparator};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ErrorContext, OptionContext, ReqsnapError, Result};
pub use locate::{locate_previous, SnapshotEntry, SnapshotLocator};
pub use model::{Environment, ProjectContext, SnapshotName};
pub use normalize::{canonicalize, HeaderRule, Normalizer, ACTIVE_MARKER};
