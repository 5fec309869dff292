use std::time::Duration;

use ripple_solver::SearchLimits;

use crate::PuzzleKind;

/// Tuning knobs for [`PuzzleGenerator`](crate::PuzzleGenerator).
///
/// The defaults are the production values. [`GeneratorConfig::deterministic`]
/// replaces every wall-clock timeout by a node budget, so results do not
/// depend on machine speed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grids whose longer side is at least this use the size-constrained
    /// partitioner, and fall back to solution-first synthesis when
    /// region-first synthesis gives up.
    pub large_grid_side: usize,
    /// Grids whose longer side is at least this skip region-first synthesis.
    pub solution_first_side: usize,
    /// Region-first synthesis budget per grid cell.
    pub synthesis_time_per_cell: Duration,
    /// Lower bound on the synthesis budget.
    pub min_synthesis_timeout: Duration,
    /// Budget of each uniqueness check made while reducing clues.
    pub uniqueness_timeout: Duration,
    /// Optional node budget applied to every search in addition to the timeouts.
    pub node_limit: Option<u64>,
    /// Use wall-clock timeouts. When `false`, only `node_limit` bounds searches.
    pub use_timeouts: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            large_grid_side: 7,
            solution_first_side: 10,
            synthesis_time_per_cell: Duration::from_millis(30),
            min_synthesis_timeout: Duration::from_millis(500),
            uniqueness_timeout: Duration::from_secs(2),
            node_limit: None,
            use_timeouts: true,
        }
    }
}

impl GeneratorConfig {
    /// A configuration bounded only by node counts.
    ///
    /// Every search gets `node_limit` nodes; the final uniqueness check gets
    /// twice as many.
    #[must_use]
    pub fn deterministic(node_limit: u64) -> Self {
        Self {
            node_limit: Some(node_limit),
            use_timeouts: false,
            ..Self::default()
        }
    }

    fn limits(&self, timeout: Duration) -> SearchLimits {
        SearchLimits {
            timeout: self.use_timeouts.then_some(timeout),
            node_limit: self.node_limit,
        }
    }

    /// Limits for synthesizing a solution of `kind`. Larger grids get larger budgets.
    #[must_use]
    pub fn synthesis_limits(&self, kind: &PuzzleKind) -> SearchLimits {
        let cells = u32::try_from(kind.cells()).unwrap_or(u32::MAX);
        let timeout = (self.synthesis_time_per_cell * cells).max(self.min_synthesis_timeout);
        self.limits(timeout)
    }

    /// Limits for one uniqueness check during clue reduction.
    #[must_use]
    pub fn uniqueness_limits(&self) -> SearchLimits {
        self.limits(self.uniqueness_timeout)
    }

    /// Limits for the final uniqueness check of an attempt.
    #[must_use]
    pub fn final_check_limits(&self) -> SearchLimits {
        let limits = self.uniqueness_limits().scale_timeout(2);
        match limits.node_limit {
            Some(nodes) => limits.and_node_limit(nodes.saturating_mul(2)),
            None => limits,
        }
    }

    /// Returns `true` if `kind` should use the size-constrained partitioner.
    #[must_use]
    pub fn is_large(&self, kind: &PuzzleKind) -> bool {
        kind.side() >= self.large_grid_side
    }

    /// Returns `true` if `kind` should skip region-first synthesis.
    #[must_use]
    pub fn is_solution_first(&self, kind: &PuzzleKind) -> bool {
        kind.side() >= self.solution_first_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;

    #[test]
    fn test_synthesis_budget_grows_with_size() {
        let config = GeneratorConfig::default();
        let small = config.synthesis_limits(&PuzzleKind::new(4, 4, Difficulty::Easy));
        let large = config.synthesis_limits(&PuzzleKind::new(10, 10, Difficulty::Easy));
        assert_eq!(small.timeout, Some(Duration::from_millis(500)));
        assert_eq!(large.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_deterministic_has_no_timeouts() {
        let config = GeneratorConfig::deterministic(1000);
        let kind = PuzzleKind::new(6, 6, Difficulty::Medium);
        assert_eq!(config.synthesis_limits(&kind), SearchLimits::with_node_limit(1000));
        assert_eq!(config.uniqueness_limits(), SearchLimits::with_node_limit(1000));
        assert_eq!(config.final_check_limits(), SearchLimits::with_node_limit(2000));
    }

    #[test]
    fn test_strategy_thresholds() {
        let config = GeneratorConfig::default();
        let medium = PuzzleKind::new(6, 6, Difficulty::Hard);
        let large = PuzzleKind::new(8, 7, Difficulty::Hard);
        let huge = PuzzleKind::new(10, 10, Difficulty::Hard);
        assert!(!config.is_large(&medium));
        assert!(config.is_large(&large) && !config.is_solution_first(&large));
        assert!(config.is_solution_first(&huge));
    }
}
