//! Project context: where a project lives and where its snapshots go.

use crate::error::{OptionContext, ReqsnapError, Result};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default backup directory name, created as a sibling of the project root.
pub const DEFAULT_BACKUP_DIR_NAME: &str = "requirements_backups";

/// Deployment environment a project is compiled for.
///
/// Selects `requirements/{env}.in` upstream and prefixes snapshot names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = ReqsnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Self::Local),
            "staging" | "stage" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ReqsnapError::validation(format!(
                "unknown environment '{other}' (expected local, staging or production)"
            ))),
        }
    }
}

/// Resolved paths and tags for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    project_root: PathBuf,
    environment: Environment,
    backup_dir: PathBuf,
}

impl ProjectContext {
    /// Resolve a context using the sibling backup-directory convention,
    /// `{project_root}/../{backup_dir_name}`.
    pub fn resolve(
        project_root: impl Into<PathBuf>,
        environment: Environment,
        backup_dir_name: &str,
    ) -> Result<Self> {
        let project_root = project_root.into();
        let parent = project_root.parent().context_none(format!(
            "project root {} has no parent directory for backups",
            project_root.display()
        ))?;
        let backup_dir = parent.join(backup_dir_name);
        tracing::debug!("backup_dir: {}", backup_dir.display());

        Ok(Self {
            project_root,
            environment,
            backup_dir,
        })
    }

    /// Build a context with an explicit backup directory.
    #[must_use]
    pub fn with_backup_dir(
        project_root: impl Into<PathBuf>,
        environment: Environment,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            environment,
            backup_dir: backup_dir.into(),
        }
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Show `path` relative to the backup directory when it lives there.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.backup_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
