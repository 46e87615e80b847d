//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use cmdfa_core::PositionSet;

pub(crate) fn ensure_occurrence_range(min: u32, max: u32) {
    if max < min {
        panic!("Node::repeat: max_occurs {max} is below min_occurs {min}");
    }
}

pub(crate) fn ensure_fold_value<T>(value: Option<T>) -> T {
    value.unwrap_or_else(|| panic!("Node::fold: child value missing from the stack"))
}

pub(crate) fn ensure_positions_assigned(assigned: usize, capacity: usize) {
    if assigned != capacity {
        panic!(
            "augment: assigned {assigned} positions but sets were sized for {capacity} \
             (leaf count plus end-of-content)"
        );
    }
}

/// The end-of-content leaf is assigned last, so its column must be the last
/// one discovered before it is trimmed from the public alphabet.
pub(crate) fn ensure_end_of_content_column(trimmed_is_eoc: bool, position: usize) {
    if !trimmed_is_eoc {
        panic!("SymbolIndex: last column is not the end-of-content sentinel (position {position})");
    }
}

pub(crate) fn ensure_follow_in_range(position: usize, follow: &[PositionSet]) {
    if position >= follow.len() {
        panic!(
            "followpos: position {position} outside table of {} entries",
            follow.len()
        );
    }
}
