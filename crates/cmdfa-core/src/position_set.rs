//! Fixed-capacity bit vector over Glushkov positions.
//!
//! Every set in one compilation shares the same capacity (leaf count plus the
//! end-of-content position), so equality and hashing are plain word
//! comparisons. That is what lets closures key the DFA state interning table.

use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PositionSet {
    capacity: usize,
    words: Box<[u64]>,
}

impl PositionSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: vec![0; capacity.div_ceil(WORD_BITS)].into_boxed_slice(),
        }
    }

    pub fn with_position(capacity: usize, position: usize) -> Self {
        let mut set = Self::new(capacity);
        set.insert(position);
        set
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// # Panics
    /// Panics if `position` is outside the capacity.
    #[inline]
    pub fn insert(&mut self, position: usize) {
        self.ensure_in_capacity(position);
        self.words[position / WORD_BITS] |= 1u64 << (position % WORD_BITS);
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        position < self.capacity
            && self.words[position / WORD_BITS] & (1u64 << (position % WORD_BITS)) != 0
    }

    /// `self |= other`.
    ///
    /// # Panics
    /// Panics if the capacities differ.
    pub fn union_with(&mut self, other: &PositionSet) {
        self.ensure_same_capacity(other);
        for (word, theirs) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= theirs;
        }
    }

    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }
}

impl fmt::Debug for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut set = PositionSet::new(70);
        set.insert(0);
        set.insert(64);
        set.insert(69);

        assert!(set.contains(0));
        assert!(set.contains(64));
        assert!(set.contains(69));
        assert!(!set.contains(1));
        assert!(!set.contains(200));
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 64, 69]);
    }

    #[test]
    fn union_and_clear() {
        let mut a = PositionSet::with_position(5, 1);
        let b = PositionSet::with_position(5, 3);
        a.union_with(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 3]);

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 5);
    }

    #[test]
    fn value_equality_keys_hash_sets() {
        let mut a = PositionSet::new(4);
        a.insert(2);
        let b = PositionSet::with_position(4, 2);

        let mut seen = HashSet::new();
        assert!(seen.insert(a));
        assert!(!seen.insert(b));
    }

    #[test]
    fn debug_lists_positions() {
        let mut set = PositionSet::new(8);
        set.insert(5);
        set.insert(2);
        assert_eq!(format!("{set:?}"), "{2, 5}");
    }

    #[test]
    #[should_panic(expected = "outside capacity")]
    fn insert_past_capacity_panics() {
        PositionSet::new(3).insert(3);
    }

    #[test]
    #[should_panic(expected = "capacity mismatch")]
    fn union_of_different_capacities_panics() {
        let mut a = PositionSet::new(3);
        a.union_with(&PositionSet::new(4));
    }
}
