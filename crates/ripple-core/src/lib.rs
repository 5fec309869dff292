//! Core data structures for Ripple Effect puzzle generation.
//!
//! This crate provides the types shared by the solver, the generator, and the
//! batch driver:
//!
//! - [`position`]: a `(row, col)` coordinate on a rectangular grid
//! - [`grid`]: a row-major matrix of small values where `0` means "empty"
//! - [`region`]: an exact partition of a grid into connected regions ("rooms")
//! - [`value_set`]: a compact bitset of cell values
//! - [`rules`]: the placement rules (region permutation and ripple distance)
//! - [`random`]: the deterministic random source every randomized step uses
//!
//! # The rules
//!
//! A solved grid holds, in every region of size `N`, each value `1..=N`
//! exactly once. Two equal values `v` in the same row or column must have at
//! least `v` cells strictly between them.
//!
//! # Examples
//!
//! ```
//! use ripple_core::{Grid, Position, RegionMap, rules};
//!
//! // Two horizontal dominoes stacked on top of each other.
//! let regions = RegionMap::from_ids(2, 2, vec![0, 0, 1, 1])?;
//! let solution = Grid::from_rows(vec![vec![1, 2], vec![2, 1]])?;
//! assert!(rules::validate_solution(&regions, &solution).is_ok());
//!
//! let mut clues = solution.clone();
//! clues.clear(Position::new(0, 0));
//! assert!(rules::is_placeable(&clues, &regions, Position::new(0, 0), 1));
//! # Ok::<(), ripple_core::GridError>(())
//! ```

pub use self::{
    error::GridError,
    grid::Grid,
    position::Position,
    random::SeededRandom,
    region::{Region, RegionMap},
    value_set::ValueSet,
};

mod error;
pub mod grid;
pub mod position;
pub mod random;
pub mod region;
pub mod rules;
pub mod value_set;
