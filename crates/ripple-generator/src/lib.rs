//! Puzzle generation pipeline for Ripple Effect puzzles.
//!
//! One generation attempt runs these stages, each drawing its randomness from
//! a single [`SeededRandom`](ripple_core::SeededRandom):
//!
//! 1. [`RegionPartitioner`] splits the grid into connected regions.
//! 2. [`SolutionSynthesizer`] fills the regions with a valid solution. Large
//!    grids use the solution-first strategy, which carves the regions out of
//!    a synthesized value grid instead.
//! 3. [`ClueReducer`] hides cells while the uniqueness oracle keeps proving a
//!    single completion, until the difficulty's target clue count is reached.
//!
//! [`PuzzleGenerator`] drives the stages for one `(kind, seed)` pair and
//! reports failed attempts as a [`RejectReason`].
//!
//! # Examples
//!
//! ```
//! use ripple_generator::{Difficulty, GeneratorConfig, PuzzleGenerator, PuzzleKind};
//!
//! let generator = PuzzleGenerator::new(GeneratorConfig::deterministic(100_000));
//! let kind: PuzzleKind = "5x5-medium".parse()?;
//!
//! for seed in 1..=20 {
//!     match generator.generate_with_seed(kind, seed) {
//!         Ok(puzzle) => println!("{}\n{}", puzzle.seed, puzzle.clues),
//!         Err(reason) => println!("seed {seed}: {reason}"),
//!     }
//! }
//! # Ok::<(), ripple_generator::ParseKindError>(())
//! ```

pub use self::{config::*, generator::*, kind::*, partition::*, reduce::*, reject::*, synthesis::*};

mod config;
mod generator;
mod kind;
mod partition;
mod reduce;
mod reject;
mod synthesis;
