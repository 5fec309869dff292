//! Deterministic randomness.
//!
//! Every randomized step of puzzle generation draws from a [`SeededRandom`]
//! passed to it explicitly. Two instances built from the same seed produce
//! identical sequences for identical call sequences, so a
//! `(seed, size, difficulty)` tuple fully determines a generated puzzle.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// A seeded pseudo-random generator.
///
/// This is not a cryptographic generator; it exists for reproducibility.
///
/// # Examples
///
/// ```
/// use ripple_core::SeededRandom;
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// assert_eq!(a.next(), b.next());
///
/// let mut values = vec![1, 2, 3, 4, 5];
/// a.shuffle(&mut values);
/// b.shuffle(&mut values.clone());
/// values.sort_unstable();
/// assert_eq!(values, vec![1, 2, 3, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg64,
}

impl SeededRandom {
    /// Creates a generator from an integer seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a float uniformly distributed in `[0, 1)`.
    #[expect(clippy::should_implement_trait)]
    #[expect(clippy::cast_precision_loss)]
    pub fn next(&mut self) -> f64 {
        // 53 random bits fill the mantissa exactly.
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Returns an integer uniformly distributed in `0..n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    #[expect(clippy::cast_precision_loss)]
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "range must not be empty");
        ((self.next() * n as f64) as usize).min(n - 1)
    }

    /// Returns `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }

    /// Picks a random element, or `None` if the slice is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.below(items.len())])
    }

    /// Picks an index according to non-negative integer weights.
    ///
    /// Returns `None` if every weight is zero.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().copied().map(u64::from).sum();
        if total == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let mut ticket = self.below(total as usize) as u64;
        for (i, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if ticket < weight {
                return Some(i);
            }
            ticket -= weight;
        }
        unreachable!("ticket is always below the total weight")
    }

    /// Shuffles a slice in place with the Fisher–Yates algorithm.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
