//! Solution counting for Ripple Effect puzzles.
//!
//! [`UniquenessSolver`] is a decision oracle: given a region map and a clue
//! grid it counts completions up to a small cap. It is used by the generator
//! to decide whether a clue can be hidden; it never hands a solution back.
//!
//! [`SearchLimits`] bounds any backtracking search by wall-clock time and/or
//! by a deterministic node count.
//!
//! # Examples
//!
//! ```
//! use ripple_core::{Grid, RegionMap};
//! use ripple_solver::{SearchLimits, UniquenessSolver};
//!
//! let regions = RegionMap::from_ids(1, 3, vec![0, 0, 0])?;
//! let clues = Grid::from_rows(vec![vec![0, 3, 0]])?;
//!
//! let solver = UniquenessSolver::new(SearchLimits::unlimited());
//! let count = solver.count_solutions(&regions, &clues);
//! assert_eq!(count.count(), 2); // 1 3 2 and 2 3 1
//! assert!(!count.is_unique());
//! # Ok::<(), ripple_core::GridError>(())
//! ```

pub use self::{limits::*, uniqueness::*};

mod limits;
mod uniqueness;

#[cfg(test)]
mod testing;
