//! A set of cell values, stored as a bitmask.
//!
//! # Examples
//!
//! ```
//! use ripple_core::ValueSet;
//!
//! let mut set = ValueSet::full(4);
//! set.remove(2);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 4]);
//! ```

use std::{
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, BitOr, Not},
};

/// A set of values in the range `1..=ValueSet::MAX`.
///
/// Bit `v` of the inner mask represents value `v`; bit 0 is never set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValueSet {
    bits: u16,
}

impl ValueSet {
    /// The largest value a set can hold, and therefore the largest region size.
    pub const MAX: u8 = 15;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the set `{1, ..., n}`.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`ValueSet::MAX`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn full(n: u8) -> Self {
        assert!(n <= Self::MAX, "value must be at most {}, got {n}", Self::MAX);
        Self {
            bits: ((1u32 << (n + 1)) - 2) as u16,
        }
    }

    /// Returns a set containing exactly `value`.
    #[must_use]
    pub fn from_elem(value: u8) -> Self {
        let mut set = Self::new();
        set.insert(value);
        set
    }

    #[inline]
    fn bit(value: u8) -> u16 {
        assert!(
            (1..=Self::MAX).contains(&value),
            "value must be between 1 and {}, got {value}",
            Self::MAX
        );
        1 << value
    }

    /// Adds a value. Returns `true` if it was not present.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `0` or exceeds [`ValueSet::MAX`].
    pub fn insert(&mut self, value: u8) -> bool {
        let bit = Self::bit(value);
        let added = self.bits & bit == 0;
        self.bits |= bit;
        added
    }

    /// Removes a value. Returns `true` if it was present.
    ///
    /// # Panics
    ///
    /// Panics if `value` is `0` or exceeds [`ValueSet::MAX`].
    pub fn remove(&mut self, value: u8) -> bool {
        let bit = Self::bit(value);
        let removed = self.bits & bit != 0;
        self.bits &= !bit;
        removed
    }

    /// Returns `true` if `value` is in the set. Out-of-range values are never contained.
    #[must_use]
    #[inline]
    pub fn contains(self, value: u8) -> bool {
        (1..=Self::MAX).contains(&value) && self.bits & (1 << value) != 0
    }

    /// Returns the number of values in the set.
    #[must_use]
    #[inline]
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the only value in the set, or `None` if it holds zero or several.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn as_single(self) -> Option<u8> {
        (self.len() == 1).then(|| self.bits.trailing_zeros() as u8)
    }

    /// Returns the values in `self` that are not in `other`.
    #[must_use]
    pub fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Iterates over the values in ascending order.
    #[must_use]
    pub fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for ValueSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitAnd for ValueSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl Not for ValueSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & !1,
        }
    }
}

impl FromIterator<u8> for ValueSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for ValueSet {
    type Item = u8;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Ascending iterator over a [`ValueSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u16,
}

impl Iterator for Iter {
    type Item = u8;

    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        let value = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}
impl FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_full() {
        assert!(ValueSet::full(0).is_empty());
        assert_eq!(ValueSet::full(1).iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(ValueSet::full(ValueSet::MAX).len(), 15);
    }

    #[test]
    #[should_panic(expected = "value must be between")]
    fn test_rejects_zero() {
        let mut set = ValueSet::new();
        set.insert(0);
    }

    #[test]
    fn test_contains_out_of_range_is_false() {
        let set = ValueSet::full(ValueSet::MAX);
        assert!(!set.contains(0));
        assert!(!set.contains(16));
    }

    #[test]
    fn test_as_single() {
        assert_eq!(ValueSet::from_elem(4).as_single(), Some(4));
        assert_eq!(ValueSet::full(2).as_single(), None);
        assert_eq!(ValueSet::EMPTY.as_single(), None);
    }

    #[test]
    fn test_not_never_contains_zero_bit() {
        let set = !ValueSet::full(3);
        assert!(!set.contains(1));
        assert!(set.contains(4));
        assert_eq!(set.len(), 12);
    }

    proptest! {
        #[test]
        fn prop_iter_is_sorted_and_matches_len(values in prop::collection::vec(1u8..=15, 0..20)) {
            let set: ValueSet = values.iter().copied().collect();
            let collected: Vec<_> = set.iter().collect();
            prop_assert_eq!(collected.len(), set.len());
            prop_assert!(collected.windows(2).all(|w| w[0] < w[1]));
            for v in values {
                prop_assert!(set.contains(v));
            }
        }
    }
}
