//! Property-based tests for canonicalization.
//!
//! Canonical equality must ignore compiler timestamps and a leading active
//! marker while staying sensitive to every other line change.

use proptest::prelude::*;
use reqsnap::normalize::{canonicalize, Normalizer};

/// A pinned requirement line; never a comment.
fn requirement() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,10}==[0-9]{1,2}\\.[0-9]{1,2}"
}

fn requirements() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(requirement(), 1..30)
}

fn timestamp() -> impl Strategy<Value = String> {
    (2000u32..2100, 1u32..13, 1u32..29, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}"),
    )
}

fn with_header(ts: &str, body: &[String]) -> Vec<String> {
    let mut lines = vec![format!("# generated {ts}")];
    lines.extend(body.iter().cloned());
    lines
}

fn canonical(lines: &[String]) -> Vec<&str> {
    canonicalize(lines.iter().map(String::as_str))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn canonicalize_doesnt_panic(text in "\\PC{0,400}") {
        let _ = Normalizer::new().canonicalize_text(&text);
    }

    #[test]
    fn canonicalize_is_idempotent(
        lines in prop::collection::vec("(# ACTIVE|# generated 2024-01-01T00:00:00|#[ a-z]{0,8}|[a-z0-9=. ]{0,12})", 0..20)
    ) {
        let once = canonical(&lines);
        let twice = canonicalize(once.iter().copied());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn timestamps_are_ignored(body in requirements(), old_ts in timestamp(), new_ts in timestamp()) {
        let old = with_header(&old_ts, &body);
        let new = with_header(&new_ts, &body);
        prop_assert_eq!(canonical(&old), canonical(&new));
    }

    #[test]
    fn leading_marker_is_ignored(body in requirements(), ts in timestamp()) {
        let plain = with_header(&ts, &body);
        let mut marked = vec!["# ACTIVE".to_string()];
        marked.extend(plain.iter().cloned());
        prop_assert_eq!(canonical(&plain), canonical(&marked));
    }

    #[test]
    fn changed_line_is_detected(body in requirements(), ts in timestamp(), idx in any::<prop::sample::Index>()) {
        let old = with_header(&ts, &body);
        let mut changed_body = body.clone();
        let i = idx.index(changed_body.len());
        changed_body[i].push('1');
        let new = with_header(&ts, &changed_body);
        prop_assert_ne!(canonical(&old), canonical(&new));
    }

    #[test]
    fn reordering_is_detected(body in requirements(), ts in timestamp(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        let (i, j) = (a.index(body.len()), b.index(body.len()));
        prop_assume!(body[i] != body[j]);
        let mut swapped = body.clone();
        swapped.swap(i, j);
        let old = with_header(&ts, &body);
        let new = with_header(&ts, &swapped);
        prop_assert_ne!(canonical(&old), canonical(&new));
    }

    #[test]
    fn removed_line_is_detected(body in requirements(), idx in any::<prop::sample::Index>()) {
        let mut shorter = body.clone();
        shorter.remove(idx.index(body.len()));
        prop_assert_ne!(canonical(&body), canonical(&shorter));
    }
}
