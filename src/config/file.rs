//! Configuration file loading and discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".reqsnap.yaml",
    ".reqsnap.yml",
    "reqsnap.yaml",
    "reqsnap.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/reqsnap/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_dirs()
        .into_iter()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Config search directories in order, for display.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    [
        cwd.clone(),
        cwd.as_deref().and_then(find_git_root),
        dirs::config_dir().map(|d| d.join("reqsnap")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Walk up from `start` to the first directory containing `.git`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# reqsnap configuration
# =====================
#
# Place this file at .reqsnap.yaml in the project root or at
# ~/.config/reqsnap/reqsnap.yaml. CLI arguments override file settings.

project:
  # Environment tag for snapshot names: local, staging, production
  environment: local

backups:
  # Directory created next to the project root
  dir_name: requirements_backups
  # Explicit directory instead of the sibling convention
  # dir: /var/backups/my_project
  # Snapshot file extension
  extension: txt
  # Snapshots kept by `reqsnap prune`
  keep_recent: 30

normalize:
  # Regex replacing the built-in timestamp header rule
  # header_pattern: '^# compiled at \d+$'
  # Marker line of the active snapshot
  active_marker: '# ACTIVE'

diff:
  # Unchanged lines around each hunk
  context_lines: 3

output:
  # text or json
  format: text
  # file: changes.diff
  quiet: false
"
    .to_string()
}
