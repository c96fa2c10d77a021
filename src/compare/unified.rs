//! Unified diff rendering over raw snapshot text.

use similar::{ChangeTag, DiffOp, TextDiff};
use std::fmt::Write as _;

/// Default number of context lines around each hunk.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Render a unified diff between `old` and `new`.
///
/// The `---`/`+++` header is always written, so the result is never empty;
/// identical inputs yield the header alone.
#[must_use]
pub fn render_unified_diff(
    old: &str,
    new: &str,
    old_label: &str,
    new_label: &str,
    context_lines: usize,
) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    let _ = writeln!(output, "--- {old_label}");
    let _ = writeln!(output, "+++ {new_label}");

    for group in diff.grouped_ops(context_lines) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let _ = writeln!(output, "{}", hunk_header(first, last));

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };

                output.push(sign);
                output.push_str(change.value());
                if !change.value().ends_with('\n') {
                    output.push('\n');
                }
            }
        }
    }

    output
}

fn hunk_header(first: &DiffOp, last: &DiffOp) -> String {
    let old_start = first.old_range().start;
    let old_len = last.old_range().end - old_start;
    let new_start = first.new_range().start;
    let new_len = last.new_range().end - new_start;
    format!(
        "@@ -{} +{} @@",
        format_range(old_start, old_len),
        format_range(new_start, new_len)
    )
}

/// Format a 0-based line range the way `diff -u` does.
fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{len}", start + 1),
    }
}
