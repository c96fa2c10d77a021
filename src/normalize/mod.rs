//! Snapshot canonicalization.
//!
//! Removes the lines that change on every compile without changing any
//! dependency: the compiler's timestamp header and the `# ACTIVE` marker.
//! Everything else is kept byte-for-byte and in order. Lines are never
//! re-sorted, so an ordering regression upstream still shows up as a change.

mod header;

pub use header::HeaderRule;

use crate::error::Result;

/// Marker line prepended to the snapshot currently in effect.
pub const ACTIVE_MARKER: &str = "# ACTIVE";

/// Canonicalizes snapshot lines for equality testing.
#[derive(Debug, Clone)]
pub struct Normalizer {
    header: HeaderRule,
    marker: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            header: HeaderRule::V1,
            marker: ACTIVE_MARKER.to_string(),
        }
    }
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom regex instead of the built-in header rule.
    pub fn with_header_pattern(mut self, pattern: impl Into<String>) -> Result<Self> {
        self.header = HeaderRule::custom(pattern)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    #[must_use]
    pub const fn header_rule(&self) -> &HeaderRule {
        &self.header
    }

    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether `line` is a compiler header comment.
    #[must_use]
    pub fn is_header_line(&self, line: &str) -> bool {
        self.header.matches(line)
    }

    /// Whether `line` is exactly the active marker.
    #[must_use]
    pub fn is_marker_line(&self, line: &str) -> bool {
        line == self.marker
    }

    /// Produce the canonical line sequence of a snapshot.
    ///
    /// Header lines are dropped wherever they appear. The marker is dropped
    /// while it still leads the file, i.e. before the first retained line;
    /// a marker further down is ordinary content. This keeps the function
    /// idempotent: its output never starts with a marker.
    pub fn canonicalize<'a, I>(&self, lines: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut leading = true;
        lines
            .into_iter()
            .filter(|line| {
                if self.is_header_line(line) {
                    return false;
                }
                if leading && self.is_marker_line(line) {
                    return false;
                }
                leading = false;
                true
            })
            .collect()
    }

    /// Canonicalize whole file contents, split on line endings.
    #[must_use]
    pub fn canonicalize_text<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.canonicalize(text.lines())
    }
}

/// Canonicalize with the built-in header rule and `# ACTIVE` marker.
pub fn canonicalize<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    Normalizer::default().canonicalize(lines)
}
