//! Glushkov follow sets, filled while the tree is reduced.

use cmdfa_core::PositionSet;

use crate::invariants::ensure_follow_in_range;

/// `followpos(p)` for every position `p < capacity`, indexed by position.
///
/// Only concatenation and the two starred repetitions add edges; choice and
/// `?` contribute nothing.
#[derive(Debug)]
pub(crate) struct FollowTable {
    sets: Vec<PositionSet>,
}

impl FollowTable {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            sets: vec![PositionSet::new(capacity); capacity],
        }
    }

    /// Every position in `from` may be followed by every position in `to`.
    pub(crate) fn link(&mut self, from: &PositionSet, to: &PositionSet) {
        for p in from.iter() {
            ensure_follow_in_range(p, &self.sets);
            self.sets[p].union_with(to);
        }
    }

    pub(crate) fn into_sets(self) -> Vec<PositionSet> {
        self.sets
    }
}
