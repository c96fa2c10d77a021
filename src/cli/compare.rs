//! Compare command handler.
//!
//! Implements the `compare` and `diff` subcommands: decide whether a new
//! snapshot differs from the previous one and optionally print the diff.

use super::ensure_valid;
use crate::compare::PreviousSnapshot;
use crate::config::CompareConfig;
use crate::pipeline::{exit_codes, write_output, ComparisonReport, OutputFormat, OutputTarget};
use anyhow::{Context, Result};

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: CompareConfig) -> Result<i32> {
    let app = &config.app;
    ensure_valid(app)?;

    let ctx = app.project_context(&config.project_root, config.environment)?;
    let mut comparator = app.comparator()?;

    let differences_found = comparator
        .compare(
            &config.new,
            PreviousSnapshot::from_option(config.previous.clone()),
            &ctx,
        )
        .with_context(|| format!("failed to compare {}", config.new.display()))?;

    let comparison = comparator
        .last_comparison()
        .context("comparison result missing after a successful compare")?;
    let diff = config
        .include_diff
        .then(|| comparator.make_diff_text(&ctx));
    let report = ComparisonReport::new(comparison, &ctx, diff);

    let quiet = app.output.quiet;
    if !quiet || app.output.format == OutputFormat::Json || report.diff.is_some() {
        let target = OutputTarget::from_option(app.output.file.clone());
        write_output(&report.render(app.output.format)?, &target, quiet)?;
    }

    Ok(determine_exit_code(differences_found))
}

const fn determine_exit_code(differences_found: bool) -> i32 {
    if differences_found {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}
