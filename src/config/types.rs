//! Configuration types for reqsnap operations.

use crate::backup::DEFAULT_KEEP_RECENT;
use crate::compare::{SnapshotComparator, DEFAULT_CONTEXT_LINES};
use crate::error::Result;
use crate::locate::SnapshotLocator;
use crate::model::{Environment, ProjectContext, DEFAULT_BACKUP_DIR_NAME, DEFAULT_EXTENSION};
use crate::normalize::{Normalizer, ACTIVE_MARKER};
use crate::pipeline::OutputFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration, loadable from `.reqsnap.yaml`.
///
/// CLI arguments are layered over whatever the file provides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Project defaults
    pub project: ProjectConfig,
    /// Backup directory layout and retention
    pub backups: BackupConfig,
    /// Canonicalization rules
    pub normalize: NormalizeConfig,
    /// Diff rendering
    pub diff: DiffTextConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Locator honouring the configured extension.
    #[must_use]
    pub fn locator(&self) -> SnapshotLocator {
        SnapshotLocator::new(self.backups.extension.clone())
    }

    /// Normalizer honouring the configured header pattern and marker.
    pub fn normalizer(&self) -> Result<Normalizer> {
        let normalizer = Normalizer::new().with_marker(self.normalize.active_marker.clone());
        match &self.normalize.header_pattern {
            Some(pattern) => normalizer.with_header_pattern(pattern.clone()),
            None => Ok(normalizer),
        }
    }

    /// Comparator wired from this configuration.
    pub fn comparator(&self) -> Result<SnapshotComparator> {
        Ok(SnapshotComparator::new()
            .with_normalizer(self.normalizer()?)
            .with_locator(self.locator())
            .with_context_lines(self.diff.context_lines))
    }

    /// Resolve the context for a project root.
    ///
    /// An explicit `backups.dir` wins over the sibling-directory convention.
    pub fn project_context(
        &self,
        project_root: impl Into<PathBuf>,
        environment: Option<Environment>,
    ) -> Result<ProjectContext> {
        let environment = environment.unwrap_or(self.project.environment);
        match &self.backups.dir {
            Some(dir) => Ok(ProjectContext::with_backup_dir(
                project_root,
                environment,
                dir.clone(),
            )),
            None => ProjectContext::resolve(project_root, environment, &self.backups.dir_name),
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.config.project.environment = environment;
        self
    }

    pub fn backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.backups.dir = Some(dir.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.backups.extension = extension.into();
        self
    }

    pub const fn keep_recent(mut self, keep: usize) -> Self {
        self.config.backups.keep_recent = keep;
        self
    }

    pub fn header_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.normalize.header_pattern = Some(pattern.into());
        self
    }

    pub const fn context_lines(mut self, lines: usize) -> Self {
        self.config.diff.context_lines = lines;
        self
    }

    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.output.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Project defaults used when the CLI does not say otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProjectConfig {
    /// Environment tag for snapshot names
    pub environment: Environment,
}

/// Backup directory layout and retention.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BackupConfig {
    /// Directory name created next to the project root
    pub dir_name: String,
    /// Explicit backup directory, overriding `dir_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Snapshot file extension, without the dot
    pub extension: String,
    /// Number of snapshots kept when pruning
    #[schemars(range(min = 1))]
    pub keep_recent: usize,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir_name: DEFAULT_BACKUP_DIR_NAME.to_string(),
            dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            keep_recent: DEFAULT_KEEP_RECENT,
        }
    }
}

/// Canonicalization rules.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Regex replacing the built-in timestamp header rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_pattern: Option<String>,
    /// Marker line denoting the active snapshot
    pub active_marker: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            header_pattern: None,
            active_marker: ACTIVE_MARKER.to_string(),
        }
    }
}

/// Diff rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffTextConfig {
    /// Unchanged lines shown around each hunk
    pub context_lines: usize,
}

impl Default for DiffTextConfig {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// Command configurations
// ============================================================================

/// Configuration for the `compare` command.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Newly compiled snapshot
    pub new: PathBuf,
    /// Explicit previous snapshot; located automatically when `None`
    pub previous: Option<PathBuf>,
    /// Project root the backup directory is derived from
    pub project_root: PathBuf,
    /// Environment override
    pub environment: Option<Environment>,
    /// Render the diff when differences are found
    pub include_diff: bool,
    /// File configuration layered under the flags above
    pub app: AppConfig,
}

/// Configuration for the `prune` command.
#[derive(Debug, Clone)]
pub struct PruneConfig {
    pub project_root: PathBuf,
    /// Overrides `backups.keep_recent`
    pub keep_recent: Option<usize>,
    pub app: AppConfig,
}
