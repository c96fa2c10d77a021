//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod compare;
mod locate;
mod mark_active;
mod new_path;
mod prune;

pub use compare::run_compare;
pub use locate::run_locate;
pub use mark_active::run_mark_active;
pub use new_path::run_new_path;
pub use prune::run_prune;

// Re-export config types used by handlers
pub use crate::config::{CompareConfig, PruneConfig};

use crate::config::{AppConfig, Validatable};

/// Reject an invalid configuration, listing every offending field.
pub(crate) fn ensure_valid(config: &AppConfig) -> anyhow::Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_valid_lists_fields() {
        let config = AppConfig::builder()
            .keep_recent(0)
            .extension(".txt")
            .build();
        let message = ensure_valid(&config).unwrap_err().to_string();
        assert!(message.contains("backups.keep_recent"));
        assert!(message.contains("backups.extension"));
    }

    #[test]
    fn test_ensure_valid_default() {
        assert!(ensure_valid(&AppConfig::default()).is_ok());
    }
}
