//! Configuration module for reqsnap.
//!
//! This module provides:
//! - Typed configuration sections with defaults
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reqsnap::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .keep_recent(10)
//!     .context_lines(1)
//!     .build();
//!
//! use reqsnap::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.reqsnap.yaml` file in your project root or `~/.config/reqsnap/`:
//!
//! ```yaml
//! backups:
//!   keep_recent: 10
//! normalize:
//!   active_marker: "# ACTIVE"
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, BackupConfig, CompareConfig, DiffTextConfig, NormalizeConfig,
    OutputConfig, ProjectConfig, PruneConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    search_dirs, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `.reqsnap.yaml` format.
///
/// Editors can use it for validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
