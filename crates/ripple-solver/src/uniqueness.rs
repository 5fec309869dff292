use std::ops::ControlFlow;

use ripple_core::{Grid, Position, RegionMap, ValueSet, rules};

use crate::{SearchBudget, SearchLimits};

/// Result of counting completions with [`UniquenessSolver`].
///
/// The count stops at the solver's cap. When the search ran out of budget,
/// `timed_out` is set and `count` is only a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionCount {
    count: usize,
    cap: usize,
    timed_out: bool,
    nodes: u64,
}

impl SolutionCount {
    /// Number of completions found, at most the cap.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if the search stopped because it reached the cap.
    #[must_use]
    pub fn cap_reached(&self) -> bool {
        self.count >= self.cap
    }

    /// Returns `true` if the search ran out of time or nodes.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Number of search nodes visited.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Exactly one completion exists, proven by an exhaustive search.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.count == 1 && !self.timed_out
    }

    /// No completion exists, proven by an exhaustive search.
    #[must_use]
    pub fn is_unsolvable(&self) -> bool {
        self.count == 0 && !self.timed_out
    }

    /// At least two completions exist.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.count >= 2
    }
}

/// Counts the completions of a clue grid, up to a cap.
///
/// Hidden cells are filled most-constrained-first: at every node the solver
/// picks the empty cell with the fewest consistent values, recomputed from the
/// current partial assignment. The search stops as soon as the count reaches
/// the cap or the [`SearchLimits`] are exhausted.
///
/// The solver never mutates its inputs; it searches on a private copy.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessSolver {
    cap: usize,
    limits: SearchLimits,
}

impl UniquenessSolver {
    /// The cap used for uniqueness checks: one solution is fine, two is not.
    pub const DEFAULT_CAP: usize = 2;

    /// Creates a solver with the default cap.
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            cap: Self::DEFAULT_CAP,
            limits,
        }
    }

    /// Sets the cap.
    ///
    /// # Panics
    ///
    /// Panics if `cap` is zero.
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        assert!(cap > 0, "cap must be positive");
        self.cap = cap;
        self
    }

    /// The configured cap.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// The configured search limits.
    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Counts completions of `clues` under `regions`, up to the cap.
    ///
    /// Clues that already break a rule (a value larger than its region, a
    /// repeat inside a region, a ripple conflict) or a grid whose shape does
    /// not match the region map yield a count of zero.
    #[must_use]
    pub fn count_solutions(&self, regions: &RegionMap, clues: &Grid) -> SolutionCount {
        let mut count = SolutionCount {
            count: 0,
            cap: self.cap,
            timed_out: false,
            nodes: 0,
        };
        if let Err(violation) = rules::check_consistent(regions, clues) {
            log::trace!("clues are inconsistent: {violation}");
            return count;
        }

        let mut search = CountSearch::new(regions, clues.clone(), self.cap, self.limits.start());
        let _ = search.run();
        count.count = search.found;
        count.timed_out = search.budget.is_exhausted();
        count.nodes = search.budget.nodes();
        count
    }
}

struct CountSearch<'a> {
    regions: &'a RegionMap,
    grid: Grid,
    used: Vec<ValueSet>,
    hidden: Vec<Position>,
    cap: usize,
    found: usize,
    budget: SearchBudget,
}

impl<'a> CountSearch<'a> {
    fn new(regions: &'a RegionMap, grid: Grid, cap: usize, budget: SearchBudget) -> Self {
        let mut used = vec![ValueSet::new(); regions.len()];
        for pos in grid.positions() {
            if let Some(value) = grid.get(pos) {
                used[regions.region_id(pos)].insert(value);
            }
        }
        let hidden = grid.empty_positions().collect();
        Self {
            regions,
            grid,
            used,
            hidden,
            cap,
            found: 0,
            budget,
        }
    }

    fn candidates(&self, pos: Position) -> ValueSet {
        let region = self.regions.region_at(pos);
        region
            .values()
            .difference(self.used[region.id()])
            .iter()
            .filter(|&value| !rules::ripple_conflict(&self.grid, pos, value))
            .collect()
    }

    /// Picks the empty cell with the fewest candidates.
    ///
    /// Returns `None` when every cell is filled, and `Some((pos, EMPTY))` as
    /// soon as a dead cell is found.
    fn most_constrained(&self) -> Option<(Position, ValueSet)> {
        let mut best: Option<(Position, ValueSet)> = None;
        for &pos in &self.hidden {
            if !self.grid.is_empty_at(pos) {
                continue;
            }
            let candidates = self.candidates(pos);
            if candidates.len() <= 1 {
                return Some((pos, candidates));
            }
            if best.is_none_or(|(_, c)| candidates.len() < c.len()) {
                best = Some((pos, candidates));
            }
        }
        best
    }

    fn place(&mut self, pos: Position, value: u8) {
        self.grid[pos] = value;
        self.used[self.regions.region_id(pos)].insert(value);
    }

    fn unplace(&mut self, pos: Position) {
        let value = self.grid.clear(pos);
        self.used[self.regions.region_id(pos)].remove(value);
    }

    fn run(&mut self) -> ControlFlow<()> {
        if !self.budget.tick() {
            return ControlFlow::Break(());
        }
        let Some((pos, candidates)) = self.most_constrained() else {
            self.found += 1;
            return if self.found >= self.cap {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            };
        };
        for value in candidates {
            self.place(pos, value);
            let flow = self.run();
            self.unplace(pos);
            flow?;
        }
        ControlFlow::Continue(())
    }
}
