use ripple_core::{Grid, RegionMap, SeededRandom, rules};

use crate::{
    ClueReducer, GeneratorConfig, PartitionStrategy, PuzzleKind, RegionPartitioner, RejectReason,
    SolutionSynthesizer, SynthesisError,
    partition::region_size_weights,
    synthesis::solution_first_value_cap,
};

/// A puzzle produced by [`PuzzleGenerator`].
///
/// `clues` is `solution` with some cells cleared, and has exactly one
/// completion under `regions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// Size and difficulty the puzzle was generated for.
    pub kind: PuzzleKind,
    /// Seed that reproduces this puzzle.
    pub seed: u64,
    /// Revealed cells; hidden cells are empty.
    pub clues: Grid,
    /// Region layout.
    pub regions: RegionMap,
    /// The unique solution.
    pub solution: Grid,
}

impl GeneratedPuzzle {
    /// Number of revealed cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.filled_count()
    }
}

impl From<SynthesisError> for RejectReason {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::OutOfBudget | SynthesisError::Unsatisfiable => Self::NoSolution,
            SynthesisError::InvalidRooms => Self::InvalidRooms,
        }
    }
}

/// Runs the full pipeline for one `(kind, seed)` attempt.
///
/// An attempt partitions the grid, synthesizes a solution, and reduces it to
/// a clue grid with a unique completion. Every random choice is drawn from a
/// [`SeededRandom`] created from the seed, so with node-bounded limits (see
/// [`GeneratorConfig::deterministic`]) the same `(kind, seed)` always yields
/// the same puzzle. Wall-clock limits keep this true only as long as no search
/// hits its timeout.
///
/// # Examples
///
/// ```
/// use ripple_generator::{Difficulty, GeneratorConfig, PuzzleGenerator, PuzzleKind};
///
/// let generator = PuzzleGenerator::new(GeneratorConfig::deterministic(100_000));
/// let kind = PuzzleKind::new(5, 5, Difficulty::Easy);
/// let puzzle = (1..)
///     .find_map(|seed| generator.generate_with_seed(kind, seed).ok())
///     .unwrap();
/// assert!(puzzle.clue_count() >= kind.target_clues());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleGenerator {
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Creates a generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the puzzle of `kind` determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns the reason the attempt was discarded.
    pub fn generate_with_seed(
        &self,
        kind: PuzzleKind,
        seed: u64,
    ) -> Result<GeneratedPuzzle, RejectReason> {
        self.attempt(kind, seed)
            .inspect_err(|reason| log::debug!("{kind} seed {seed}: rejected ({reason})"))
    }

    fn attempt(&self, kind: PuzzleKind, seed: u64) -> Result<GeneratedPuzzle, RejectReason> {
        let mut rng = SeededRandom::new(seed);
        let (regions, solution) = self.synthesize(&kind, &mut rng)?;
        if let Err(violation) = rules::validate_solution(&regions, &solution) {
            log::warn!("{kind} seed {seed}: synthesized an invalid solution: {violation}");
            return Err(RejectReason::InvalidRooms);
        }

        let reducer = ClueReducer::new(
            self.config.uniqueness_limits(),
            self.config.final_check_limits(),
        );
        let clues = reducer.reduce(&regions, &solution, kind.target_clues(), &mut rng)?;
        Ok(GeneratedPuzzle {
            kind,
            seed,
            clues,
            regions,
            solution,
        })
    }

    fn synthesize(
        &self,
        kind: &PuzzleKind,
        rng: &mut SeededRandom,
    ) -> Result<(RegionMap, Grid), RejectReason> {
        let synthesizer = SolutionSynthesizer::new(self.config.synthesis_limits(kind));
        if self.config.is_solution_first(kind) {
            return Self::solution_first(&synthesizer, kind, rng);
        }

        let strategy = if self.config.is_large(kind) {
            PartitionStrategy::SizeConstrained
        } else {
            PartitionStrategy::RandomGrowth
        };
        let regions = RegionPartitioner::new(strategy)
            .partition(kind.rows, kind.cols, rng)
            .map_err(|err| {
                log::warn!("{kind}: partitioner produced a malformed map: {err}");
                RejectReason::InvalidRooms
            })?;

        match synthesizer.region_first(&regions, rng) {
            Ok(solution) => Ok((regions, solution)),
            Err(err) if self.config.is_large(kind) => {
                log::debug!("{kind}: region-first synthesis failed ({err}), trying solution-first");
                Self::solution_first(&synthesizer, kind, rng)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn solution_first(
        synthesizer: &SolutionSynthesizer,
        kind: &PuzzleKind,
        rng: &mut SeededRandom,
    ) -> Result<(RegionMap, Grid), RejectReason> {
        let (solution, regions) = synthesizer.solution_first(
            kind.rows,
            kind.cols,
            solution_first_value_cap(kind.side()),
            region_size_weights(kind.rows, kind.cols),
            rng,
        )?;
        Ok((regions, solution))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ripple_solver::{SearchLimits, UniquenessSolver};

    use super::*;
    use crate::Difficulty;

    fn deterministic() -> PuzzleGenerator {
        PuzzleGenerator::new(GeneratorConfig::deterministic(50_000))
    }

    fn first_accepted(generator: &PuzzleGenerator, kind: PuzzleKind) -> GeneratedPuzzle {
        (0..200)
            .find_map(|seed| generator.generate_with_seed(kind, seed).ok())
            .unwrap()
    }

    fn assert_accepted_properties(puzzle: &GeneratedPuzzle) {
        assert_eq!(puzzle.clues.rows(), puzzle.kind.rows);
        assert_eq!(puzzle.clues.cols(), puzzle.kind.cols);
        assert_eq!(rules::validate_solution(&puzzle.regions, &puzzle.solution), Ok(()));
        for pos in puzzle.clues.positions() {
            if let Some(value) = puzzle.clues.get(pos) {
                assert_eq!(puzzle.solution[pos], value, "clue at {pos}");
            }
        }
        let count = UniquenessSolver::new(SearchLimits::unlimited())
            .count_solutions(&puzzle.regions, &puzzle.clues);
        assert!(count.is_unique());
        assert!(puzzle.clue_count() >= puzzle.kind.target_clues());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = deterministic();
        let kind = PuzzleKind::new(6, 6, Difficulty::Medium);
        for seed in 0..8 {
            assert_eq!(
                generator.generate_with_seed(kind, seed),
                generator.generate_with_seed(kind, seed)
            );
        }
    }

    #[test]
    fn test_accepted_puzzles_hold_invariants() {
        let generator = deterministic();
        for difficulty in Difficulty::ALL {
            let puzzle = first_accepted(&generator, PuzzleKind::new(5, 5, difficulty));
            assert_accepted_properties(&puzzle);
        }
    }

    #[test]
    fn test_rectangular_grid() {
        let puzzle = first_accepted(&deterministic(), PuzzleKind::new(4, 7, Difficulty::Hard));
        assert_accepted_properties(&puzzle);
    }

    #[test]
    fn test_solution_first_path() {
        let config = GeneratorConfig {
            large_grid_side: 6,
            solution_first_side: 6,
            ..GeneratorConfig::deterministic(50_000)
        };
        let generator = PuzzleGenerator::new(config);
        let puzzle = first_accepted(&generator, PuzzleKind::new(6, 6, Difficulty::Easy));
        assert_accepted_properties(&puzzle);
    }

    #[test]
    fn test_large_default_sizes() {
        // 8x8 falls back to solution-first when region-first gives up;
        // 10x10 goes there directly.
        let generator = deterministic();
        assert!(!generator.config().is_solution_first(&PuzzleKind::new(8, 8, Difficulty::Easy)));
        for kind in [
            PuzzleKind::new(8, 8, Difficulty::Easy),
            PuzzleKind::new(10, 10, Difficulty::Easy),
        ] {
            let puzzle = first_accepted(&generator, kind);
            assert_accepted_properties(&puzzle);
        }
    }

    #[test]
    fn test_starved_synthesis_is_rejected() {
        let generator = PuzzleGenerator::new(GeneratorConfig::deterministic(2));
        let result = generator.generate_with_seed(PuzzleKind::new(5, 5, Difficulty::Easy), 1);
        assert_eq!(result, Err(RejectReason::NoSolution));
    }

    #[test]
    fn test_four_by_four_with_size_four_regions() {
        // Four 2x2 regions: every region holds 1..=4 once.
        let regions = RegionMap::from_ids(
            4,
            4,
            vec![
                0, 0, 1, 1, //
                0, 0, 1, 1, //
                2, 2, 3, 3, //
                2, 2, 3, 3, //
            ],
        )
        .unwrap();
        let synthesizer = SolutionSynthesizer::new(SearchLimits::unlimited());
        let solution = (0..)
            .find_map(|seed| {
                synthesizer
                    .region_first(&regions, &mut SeededRandom::new(seed))
                    .ok()
            })
            .unwrap();
        assert_eq!(rules::validate_solution(&regions, &solution), Ok(()));

        let count = UniquenessSolver::new(SearchLimits::unlimited())
            .count_solutions(&regions, &solution);
        assert!(count.is_unique());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_accepted_puzzles_are_unique(
            seed in 0u64..10_000,
            rows in 3usize..6,
            cols in 3usize..6,
        ) {
            let kind = PuzzleKind::new(rows, cols, Difficulty::Hard);
            if let Ok(puzzle) = deterministic().generate_with_seed(kind, seed) {
                assert_accepted_properties(&puzzle);
            }
        }
    }
}
