//! Shared plumbing between the comparator and the CLI handlers.
//!
//! Output targets, report rendering and process exit codes live here so
//! every subcommand reports results the same way.

mod output;
mod report;

pub use output::{write_output, OutputFormat, OutputTarget};
pub use report::ComparisonReport;

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no differences detected (or differences without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Differences were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
