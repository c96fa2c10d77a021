//! Recognition of the lock compiler's timestamp-bearing header comments.
//!
//! `uv pip compile` writes a header such as
//!
//! ```text
//! # This file was autogenerated by uv via the following command:
//! #    uv pip compile requirements/local.in --output-file ../requirements_backups/local_2024-01-01T00-00-00.txt --universal --python 3.12
//! ```
//!
//! The second line changes on every run because the output file name embeds
//! the compile time. Rule V1 matches any comment line carrying a date-time in
//! either `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DDTHH-MM-SS` form. It is pinned by
//! the `uv_header` fixture; if the compiler's header changes, add a new rule
//! version rather than editing V1.

use crate::error::{ReqsnapError, Result};
use regex::Regex;
use std::sync::LazyLock;

static HEADER_V1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#.*\d{4}-\d{2}-\d{2}T\d{2}[:-]\d{2}[:-]\d{2}").expect("static regex")
});

/// Pattern deciding which comment lines are volatile compiler output.
#[derive(Debug, Clone, Default)]
pub enum HeaderRule {
    /// Comment line containing an ISO-like date-time.
    #[default]
    V1,
    /// User-supplied regex, matched against each raw line.
    Custom { pattern: String, regex: Regex },
}

impl HeaderRule {
    /// Compile a custom header pattern.
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).map_err(|source| ReqsnapError::HeaderPattern {
            pattern: pattern.clone(),
            source,
        })?;
        Ok(Self::Custom { pattern, regex })
    }

    /// Short identifier for logs and reports.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::V1 => "v1",
            Self::Custom { pattern, .. } => pattern,
        }
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::V1 => HEADER_V1.is_match(line),
            Self::Custom { regex, .. } => regex.is_match(line),
        }
    }
}
