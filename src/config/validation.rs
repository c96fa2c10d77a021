//! Configuration validation for reqsnap.

use super::types::{AppConfig, BackupConfig, DiffTextConfig, NormalizeConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.backups.validate());
        errors.extend(self.normalize.validate());
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for BackupConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.dir.is_none() {
            if self.dir_name.trim().is_empty() {
                errors.push(ConfigError::new("backups.dir_name", "must not be empty"));
            } else if self.dir_name.contains(['/', '\\']) {
                errors.push(ConfigError::new(
                    "backups.dir_name",
                    format!(
                        "'{}' must be a plain directory name; use backups.dir for a path",
                        self.dir_name
                    ),
                ));
            }
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            errors.push(ConfigError::new(
                "backups.extension",
                format!(
                    "'{}' must be a non-empty extension without the leading dot",
                    self.extension
                ),
            ));
        }

        if self.keep_recent == 0 {
            errors.push(ConfigError::new(
                "backups.keep_recent",
                "must keep at least one snapshot",
            ));
        }

        errors
    }
}

impl Validatable for NormalizeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(pattern) = &self.header_pattern {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ConfigError::new(
                    "normalize.header_pattern",
                    format!("invalid regex: {e}"),
                ));
            }
        }

        if self.active_marker.trim().is_empty() {
            errors.push(ConfigError::new(
                "normalize.active_marker",
                "must not be empty",
            ));
        } else if !self.active_marker.trim_start().starts_with('#') {
            errors.push(ConfigError::new(
                "normalize.active_marker",
                format!("'{}' must be a comment line", self.active_marker),
            ));
        }

        errors
    }
}

impl Validatable for DiffTextConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.context_lines > 100 {
            errors.push(ConfigError::new(
                "diff.context_lines",
                format!("{} is unreasonably large (max 100)", self.context_lines),
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_keep_recent_zero() {
        let config = AppConfig::builder().keep_recent(0).build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "backups.keep_recent");
    }

    #[test]
    fn test_extension_with_dot() {
        let config = AppConfig::builder().extension(".txt").build();
        assert!(config
            .validate()
            .iter()
            .any(|e| e.field == "backups.extension"));
    }

    #[test]
    fn test_dir_name_with_separator() {
        let mut config = AppConfig::default();
        config.backups.dir_name = "../elsewhere".to_string();
        assert!(config
            .validate()
            .iter()
            .any(|e| e.field == "backups.dir_name"));

        // Irrelevant once an explicit dir is set.
        config.backups.dir = Some(PathBuf::from("/var/backups"));
        assert!(config.is_valid());
    }

    #[test]
    fn test_bad_header_pattern() {
        let config = AppConfig::builder().header_pattern("(oops").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "normalize.header_pattern");
    }

    #[test]
    fn test_marker_must_be_comment() {
        let mut config = AppConfig::default();
        config.normalize.active_marker = "ACTIVE".to_string();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_output_file_parent_missing() {
        let config = AppConfig::builder()
            .output_file(Some(PathBuf::from("/nonexistent/dir/diff.txt")))
            .build();
        assert!(config.validate().iter().any(|e| e.field == "output.file"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::new("diff.context_lines", "too large");
        assert_eq!(err.to_string(), "diff.context_lines: too large");
    }
}
