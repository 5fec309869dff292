//! Clue minimization bounded by the uniqueness oracle.

use ripple_core::{Grid, RegionMap, SeededRandom};
use ripple_solver::{SearchLimits, UniquenessSolver};

use crate::RejectReason;

/// Hides solution cells while the puzzle keeps a unique solution.
///
/// Cells are visited once each, in random order. A cell stays hidden only if
/// the oracle proves the remaining clues still have exactly one completion;
/// an inconclusive check (budget exhausted) restores the cell. Reduction stops
/// as soon as the revealed count reaches the target, so the target is a floor
/// the reducer aims for, not a guarantee.
#[derive(Debug, Clone, Copy)]
pub struct ClueReducer {
    probe: UniquenessSolver,
    final_check: UniquenessSolver,
}

impl ClueReducer {
    /// Creates a reducer.
    ///
    /// `probe_limits` bound each per-cell check, `final_limits` the check of
    /// the finished clue grid.
    #[must_use]
    pub fn new(probe_limits: SearchLimits, final_limits: SearchLimits) -> Self {
        Self {
            probe: UniquenessSolver::new(probe_limits),
            final_check: UniquenessSolver::new(final_limits),
        }
    }

    /// Reduces `solution` towards `target` revealed cells.
    ///
    /// Returns the clue grid: `solution` with some cells cleared.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectReason`] of the final uniqueness check when it does
    /// not prove exactly one completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_core::{Grid, RegionMap, SeededRandom};
    /// use ripple_generator::ClueReducer;
    /// use ripple_solver::SearchLimits;
    ///
    /// let regions = RegionMap::from_ids(1, 3, vec![0, 0, 0])?;
    /// let solution = Grid::from_rows(vec![vec![1, 2, 3]])?;
    /// let reducer = ClueReducer::new(SearchLimits::unlimited(), SearchLimits::unlimited());
    /// let clues = reducer.reduce(&regions, &solution, 0, &mut SeededRandom::new(1)).unwrap();
    /// assert!(clues.filled_count() >= 1);
    /// # Ok::<(), ripple_core::GridError>(())
    /// ```
    pub fn reduce(
        &self,
        regions: &RegionMap,
        solution: &Grid,
        target: usize,
        rng: &mut SeededRandom,
    ) -> Result<Grid, RejectReason> {
        let mut clues = solution.clone();
        let mut revealed = clues.filled_count();
        let mut order: Vec<_> = clues.positions().collect();
        rng.shuffle(&mut order);

        for pos in order {
            if revealed <= target {
                break;
            }
            let value = clues.clear(pos);
            if self.probe.count_solutions(regions, &clues).is_unique() {
                revealed -= 1;
            } else {
                clues[pos] = value;
            }
        }

        let count = self.final_check.count_solutions(regions, &clues);
        if count.is_unique() {
            Ok(clues)
        } else if count.timed_out() {
            Err(RejectReason::UniquenessTimeout)
        } else if count.is_unsolvable() {
            log::warn!("reduced clue grid has no solution:\n{clues}");
            Err(RejectReason::NoFinalSolution)
        } else {
            Err(RejectReason::NotUnique)
        }
    }
}

#[cfg(test)]
mod tests {
    use ripple_core::rules;
    use ripple_solver::SolutionCount;

    use super::*;
    use crate::{PartitionStrategy, RegionPartitioner, SolutionSynthesizer};

    fn unlimited() -> ClueReducer {
        ClueReducer::new(SearchLimits::unlimited(), SearchLimits::unlimited())
    }

    fn six_by_six() -> (RegionMap, Grid) {
        let partitioner = RegionPartitioner::new(PartitionStrategy::RandomGrowth);
        let synthesizer = SolutionSynthesizer::new(SearchLimits::with_node_limit(200_000));
        (0..)
            .find_map(|seed| {
                let mut rng = SeededRandom::new(seed);
                let regions = partitioner.partition(6, 6, &mut rng).ok()?;
                let solution = synthesizer.region_first(&regions, &mut rng).ok()?;
                Some((regions, solution))
            })
            .unwrap()
    }

    fn count(regions: &RegionMap, clues: &Grid) -> SolutionCount {
        UniquenessSolver::new(SearchLimits::unlimited()).count_solutions(regions, clues)
    }

    #[test]
    fn test_reduced_grid_is_unique_and_faithful() {
        let (regions, solution) = six_by_six();
        for seed in 0..4 {
            let target = 12;
            let clues = unlimited()
                .reduce(&regions, &solution, target, &mut SeededRandom::new(seed))
                .unwrap();
            assert!(clues.filled_count() >= target);
            assert!(clues.filled_count() <= solution.filled_count());
            for pos in clues.positions() {
                if let Some(value) = clues.get(pos) {
                    assert_eq!(solution[pos], value);
                }
            }
            assert!(count(&regions, &clues).is_unique());
        }
    }

    #[test]
    fn test_target_above_cell_count_keeps_everything() {
        let (regions, solution) = six_by_six();
        let clues = unlimited()
            .reduce(&regions, &solution, 36, &mut SeededRandom::new(0))
            .unwrap();
        assert_eq!(clues, solution);
    }

    #[test]
    fn test_unreachable_target_stops_above_it() {
        // Hiding everything leaves two completions.
        let regions = RegionMap::from_ids(2, 2, vec![0, 1, 0, 1]).unwrap();
        let solution = Grid::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap();
        assert_eq!(rules::validate_solution(&regions, &solution), Ok(()));
        let clues = unlimited()
            .reduce(&regions, &solution, 0, &mut SeededRandom::new(9))
            .unwrap();
        assert!(clues.filled_count() >= 1);
        assert!(count(&regions, &clues).is_unique());
    }

    #[test]
    fn test_starved_probe_keeps_all_clues() {
        let (regions, solution) = six_by_six();
        // A one-node probe can never prove uniqueness of a grid with a hole.
        let reducer =
            ClueReducer::new(SearchLimits::with_node_limit(1), SearchLimits::unlimited());
        let clues = reducer
            .reduce(&regions, &solution, 0, &mut SeededRandom::new(0))
            .unwrap();
        assert_eq!(clues, solution);
    }

    #[test]
    fn test_starved_final_check_times_out() {
        let (regions, solution) = six_by_six();
        let reducer =
            ClueReducer::new(SearchLimits::unlimited(), SearchLimits::with_node_limit(1));
        let err = reducer
            .reduce(&regions, &solution, 12, &mut SeededRandom::new(0))
            .unwrap_err();
        assert_eq!(err, RejectReason::UniquenessTimeout);
    }
}
