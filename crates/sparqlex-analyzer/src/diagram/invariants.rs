//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

#[inline]
pub(super) fn ensure_node_id<T>(id: Option<T>, slot: &str) -> T {
    match id {
        Some(id) => id,
        None => panic!("emit: {slot} has no node id"),
    }
}

#[inline]
pub(super) fn assert_scope_closed(depth: usize, what: &str) {
    assert_eq!(depth, 0, "emit: unbalanced {what} nesting");
}
