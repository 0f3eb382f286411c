//! Exact-duplicate removal.

use std::collections::BTreeSet;

/// Keeps the first item for every distinct key, preserving input order.
///
/// Returns the surviving items and the number removed.
pub fn dedupe_by_key<T, K, F>(items: Vec<T>, key: F) -> (Vec<T>, usize)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let before = items.len();
    let mut seen = BTreeSet::new();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}
