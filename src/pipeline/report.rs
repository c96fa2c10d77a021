//! Rendering of comparison results for the terminal and for tooling.

use super::OutputFormat;
use crate::compare::Comparison;
use crate::model::ProjectContext;
use anyhow::{Context, Result};
use serde::Serialize;

/// Serializable summary of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Newly compiled snapshot
    pub new: String,
    /// Snapshot it was compared against, `None` for a first snapshot
    pub previous: Option<String>,
    pub differences_found: bool,
    /// Unified diff, present only when requested and differences were found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl ComparisonReport {
    /// Build a report; paths are shown relative to the backup directory.
    #[must_use]
    pub fn new(comparison: &Comparison, ctx: &ProjectContext, diff: Option<String>) -> Self {
        Self {
            new: ctx.display_path(comparison.new_path()),
            previous: comparison.old_path().map(|p| ctx.display_path(p)),
            differences_found: comparison.differences_found(),
            diff: diff.filter(|d| !d.is_empty()),
        }
    }

    /// One-line verdict for the text format.
    #[must_use]
    pub fn summary_line(&self) -> String {
        match (&self.previous, self.differences_found) {
            (None, _) => format!("{}: no previous snapshot, treating as changed", self.new),
            (Some(prev), true) => format!("{}: differs from {prev}", self.new),
            (Some(prev), false) => format!("{}: no differences from {prev}", self.new),
        }
    }

    /// Render in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to serialize report")
            }
            OutputFormat::Text => {
                let mut out = self.summary_line();
                out.push('\n');
                if let Some(diff) = &self.diff {
                    out.push('\n');
                    out.push_str(diff);
                }
                Ok(out)
            }
        }
    }
}
