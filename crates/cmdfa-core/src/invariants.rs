//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::PositionSet;

impl PositionSet {
    pub(crate) fn ensure_in_capacity(&self, position: usize) {
        if position >= self.capacity() {
            panic!(
                "PositionSet: position {position} outside capacity {} \
                 (every set in a compilation must be sized for all leaves plus end-of-content)",
                self.capacity()
            );
        }
    }

    pub(crate) fn ensure_same_capacity(&self, other: &PositionSet) {
        if self.capacity() != other.capacity() {
            panic!(
                "PositionSet: capacity mismatch ({} vs {})",
                self.capacity(),
                other.capacity()
            );
        }
    }
}
