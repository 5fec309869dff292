//! Synthesis of fully filled, valid solution grids.
//!
//! Two strategies are available:
//!
//! - [`SolutionSynthesizer::region_first`] fills a fixed region map by
//!   randomized backtracking, smallest regions first.
//! - [`SolutionSynthesizer::solution_first`] ignores regions, fills the grid
//!   with low values under the ripple rule alone, then carves regions out of
//!   the filled grid. It scales to grids where region-first search thrashes.
//!
//! Both return a complete, validated solution or an error; partial grids never
//! escape.

use ripple_core::{
    Grid, Position, Region, RegionMap, SeededRandom, ValueSet,
    rules::{self, ripple_conflict},
};
use ripple_solver::{SearchBudget, SearchLimits};

use crate::partition::pick_target_size;

const UNASSIGNED: usize = usize::MAX;

/// Reasons synthesis can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SynthesisError {
    /// The search budget ran out before a solution was found.
    #[display("search budget exhausted")]
    OutOfBudget,
    /// The whole search space was explored without a solution.
    #[display("no solution exists")]
    Unsatisfiable,
    /// Regions could not be derived around a synthesized value grid.
    #[display("could not derive valid regions")]
    InvalidRooms,
}

/// Largest value used by solution-first synthesis on a grid with the given longer side.
#[must_use]
pub fn solution_first_value_cap(side: usize) -> u8 {
    if side >= 14 { 4 } else { 5 }
}

/// Produces complete solution grids.
#[derive(Debug, Clone, Copy)]
pub struct SolutionSynthesizer {
    limits: SearchLimits,
}

impl SolutionSynthesizer {
    /// Creates a synthesizer whose searches are bounded by `limits`.
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    /// Fills `regions` with a valid solution.
    ///
    /// Regions are filled in ascending size order. Each cell tries the values
    /// its region still lacks, in random order; after every placement the
    /// regions sharing a line with the new value are checked to still have a
    /// home for each missing value.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::OutOfBudget`] when the limits are hit and
    /// [`SynthesisError::Unsatisfiable`] when no filling exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_core::{RegionMap, SeededRandom, rules};
    /// use ripple_generator::SolutionSynthesizer;
    /// use ripple_solver::SearchLimits;
    ///
    /// let regions = RegionMap::single(2, 2);
    /// let synthesizer = SolutionSynthesizer::new(SearchLimits::unlimited());
    /// let solution = synthesizer.region_first(&regions, &mut SeededRandom::new(3))?;
    /// assert!(rules::validate_solution(&regions, &solution).is_ok());
    /// # Ok::<(), ripple_generator::SynthesisError>(())
    /// ```
    pub fn region_first(
        &self,
        regions: &RegionMap,
        rng: &mut SeededRandom,
    ) -> Result<Grid, SynthesisError> {
        let mut order: Vec<&Region> = regions.regions().iter().collect();
        order.sort_by_key(|region| region.size());
        let cells = order
            .iter()
            .flat_map(|region| region.cells().iter().copied())
            .collect();

        let mut search = RegionFirst {
            regions,
            grid: Grid::new(regions.rows(), regions.cols()),
            used: vec![ValueSet::new(); regions.len()],
            cells,
            rng,
            budget: self.limits.start(),
        };
        if search.fill(0)? {
            debug_assert!(rules::validate_solution(regions, &search.grid).is_ok());
            Ok(search.grid)
        } else {
            Err(SynthesisError::Unsatisfiable)
        }
    }

    /// Synthesizes a value grid first, then derives regions from it.
    ///
    /// Values are capped at `max_value` and placed most-constrained-cell
    /// first, favoring small values. Regions are then grown from every `1`
    /// by absorbing neighbors holding the next value; a region keeps growing
    /// past its random target size only when a neighbor has nowhere else to
    /// go. Leftover cells are attached to a neighboring region that lacks
    /// exactly their value. Whatever is still left is cleared and refilled
    /// cell by cell, each cell either joining a neighboring region with that
    /// region's next value or starting a new region with `1`; when a refill
    /// gets stuck, the regions around it are released and refilled with it.
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::OutOfBudget`] when the limits are hit,
    /// [`SynthesisError::Unsatisfiable`] when the value grid cannot be filled,
    /// and [`SynthesisError::InvalidRooms`] when even a refill of the whole
    /// grid finds no region layout.
    pub fn solution_first(
        &self,
        rows: usize,
        cols: usize,
        max_value: u8,
        size_weights: &[u32],
        rng: &mut SeededRandom,
    ) -> Result<(Grid, RegionMap), SynthesisError> {
        let mut fill = ValueFill {
            grid: Grid::new(rows, cols),
            max_value,
            rng,
            budget: self.limits.start(),
        };
        if !fill.fill()? {
            return Err(SynthesisError::Unsatisfiable);
        }
        let ValueFill {
            grid,
            rng,
            mut budget,
            ..
        } = fill;
        let max_region = size_weights.len().max(usize::from(max_value));
        RegionCarver::new(grid, size_weights, max_region).carve(rng, &mut budget)
    }
}

struct RegionFirst<'a, 'r> {
    regions: &'a RegionMap,
    grid: Grid,
    used: Vec<ValueSet>,
    cells: Vec<Position>,
    rng: &'r mut SeededRandom,
    budget: SearchBudget,
}

impl RegionFirst<'_, '_> {
    fn place(&mut self, pos: Position, value: u8) {
        self.grid[pos] = value;
        self.used[self.regions.region_id(pos)].insert(value);
    }

    fn unplace(&mut self, pos: Position) {
        let value = self.grid.clear(pos);
        self.used[self.regions.region_id(pos)].remove(value);
    }

    /// Every value missing from `region` still has an empty cell that can take it.
    fn region_feasible(&self, region: &Region) -> bool {
        let missing = region.values().difference(self.used[region.id()]);
        missing.iter().all(|value| {
            region
                .cells()
                .iter()
                .any(|&pos| self.grid.is_empty_at(pos) && !ripple_conflict(&self.grid, pos, value))
        })
    }

    /// Checks the regions that placing `value` at `pos` may have starved.
    fn feasible_after(&self, pos: Position, value: u8) -> bool {
        let reach = usize::from(value);
        let mut touched = vec![self.regions.region_id(pos)];
        for d in 1..=reach {
            let line = [
                (pos.col >= d).then(|| Position::new(pos.row, pos.col - d)),
                Some(Position::new(pos.row, pos.col + d)),
                (pos.row >= d).then(|| Position::new(pos.row - d, pos.col)),
                Some(Position::new(pos.row + d, pos.col)),
            ];
            for other in line.into_iter().flatten() {
                if self.grid.contains(other) && self.grid.is_empty_at(other) {
                    touched.push(self.regions.region_id(other));
                }
            }
        }
        touched.sort_unstable();
        touched.dedup();
        touched
            .into_iter()
            .all(|id| self.region_feasible(&self.regions.regions()[id]))
    }

    fn fill(&mut self, k: usize) -> Result<bool, SynthesisError> {
        if !self.budget.tick() {
            return Err(SynthesisError::OutOfBudget);
        }
        let Some(&pos) = self.cells.get(k) else {
            return Ok(true);
        };
        let region = self.regions.region_at(pos);
        let mut values: Vec<u8> = region
            .values()
            .difference(self.used[region.id()])
            .iter()
            .collect();
        self.rng.shuffle(&mut values);

        for value in values {
            if ripple_conflict(&self.grid, pos, value) {
                continue;
            }
            self.place(pos, value);
            if self.feasible_after(pos, value) && self.fill(k + 1)? {
                return Ok(true);
            }
            self.unplace(pos);
        }
        Ok(false)
    }
}

struct ValueFill<'r> {
    grid: Grid,
    max_value: u8,
    rng: &'r mut SeededRandom,
    budget: SearchBudget,
}

impl ValueFill<'_> {
    fn candidates(&self, pos: Position) -> ValueSet {
        ValueSet::full(self.max_value)
            .iter()
            .filter(|&value| !ripple_conflict(&self.grid, pos, value))
            .collect()
    }

    fn most_constrained(&self) -> Option<(Position, ValueSet)> {
        let mut best: Option<(Position, ValueSet)> = None;
        for pos in self.grid.empty_positions() {
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

    /// Orders candidates randomly, weighting small values up.
    fn small_first(&mut self, candidates: ValueSet) -> Vec<u8> {
        let mut remaining: Vec<u8> = candidates.iter().collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let weights: Vec<u32> = remaining
                .iter()
                .map(|&value| u32::from(self.max_value + 1 - value))
                .collect();
            let i = self.rng.weighted_index(&weights).unwrap_or(0);
            ordered.push(remaining.remove(i));
        }
        ordered
    }

    fn fill(&mut self) -> Result<bool, SynthesisError> {
        if !self.budget.tick() {
            return Err(SynthesisError::OutOfBudget);
        }
        let Some((pos, candidates)) = self.most_constrained() else {
            return Ok(true);
        };
        for value in self.small_first(candidates) {
            self.grid[pos] = value;
            if self.fill()? {
                return Ok(true);
            }
            self.grid.clear(pos);
        }
        Ok(false)
    }
}

/// Search nodes a refill may spend per released cell before more of the
/// surrounding regions are released.
const REFILL_NODES_PER_CELL: u64 = 16;

/// How a refilled cell enters a region.
#[derive(Debug, Clone, Copy)]
enum Choice {
    /// Join the region with this id, taking its next value.
    Join(usize),
    /// Start a new region holding `1`.
    Open,
}

struct RegionCarver<'w> {
    grid: Grid,
    weights: &'w [u32],
    max_region: usize,
    ids: Vec<usize>,
    regions: Vec<Vec<Position>>,
    targets: Vec<usize>,
}

impl<'w> RegionCarver<'w> {
    fn new(grid: Grid, weights: &'w [u32], max_region: usize) -> Self {
        let ids = vec![UNASSIGNED; grid.len()];
        Self {
            grid,
            weights,
            max_region: max_region.min(usize::from(ValueSet::MAX)),
            ids,
            regions: Vec::new(),
            targets: Vec::new(),
        }
    }

    fn id_at(&self, pos: Position) -> usize {
        self.ids[self.grid.index_of(pos)]
    }

    fn assign(&mut self, pos: Position, id: usize) {
        let i = self.grid.index_of(pos);
        self.ids[i] = id;
        self.regions[id].push(pos);
    }

    fn open(&mut self, pos: Position, target: usize) -> usize {
        let id = self.regions.len();
        self.regions.push(Vec::new());
        self.targets.push(target);
        self.assign(pos, id);
        id
    }

    fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        pos.neighbors(self.grid.rows(), self.grid.cols())
    }

    /// Regions next to `pos`, sorted and deduplicated.
    fn neighbor_regions(&self, pos: Position) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .neighbors(pos)
            .map(|n| self.id_at(n))
            .filter(|&id| id != UNASSIGNED)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn unassigned(&self) -> Vec<Position> {
        self.grid
            .positions()
            .filter(|&pos| self.id_at(pos) == UNASSIGNED)
            .collect()
    }

    /// The value a cell joining region `id` must hold.
    #[expect(clippy::cast_possible_truncation)]
    fn next_value(&self, id: usize) -> u8 {
        (self.regions[id].len() + 1) as u8
    }

    /// Unassigned neighbors of region `id` holding `value`, sorted and deduplicated.
    fn frontier(&self, id: usize, value: usize) -> Vec<Position> {
        let mut frontier: Vec<Position> = self.regions[id]
            .iter()
            .flat_map(|&pos| self.neighbors(pos))
            .filter(|&pos| self.id_at(pos) == UNASSIGNED && usize::from(self.grid[pos]) == value)
            .collect();
        frontier.sort_unstable();
        frontier.dedup();
        frontier
    }

    /// Returns `true` if an unassigned cell holding `value` could join some
    /// region other than `id`: it touches a cell holding `value - 1` outside `id`.
    fn has_other_home(&self, pos: Position, id: usize) -> bool {
        let below = usize::from(self.grid[pos]) - 1;
        self.neighbors(pos)
            .any(|n| self.id_at(n) != id && usize::from(self.grid[n]) == below)
    }

    fn grow(&mut self, seed: Position, rng: &mut SeededRandom) {
        let target = pick_target_size(self.weights, rng);
        let id = self.open(seed, target);

        loop {
            let size = self.regions[id].len();
            if size >= self.max_region {
                break;
            }
            let mut frontier = self.frontier(id, size + 1);
            if size >= target {
                frontier.retain(|&pos| !self.has_other_home(pos, id));
            }
            let Some(&next) = rng.choose(&frontier) else {
                break;
            };
            self.assign(next, id);
        }
    }

    /// Attaches leftover cells to a neighboring region whose size is one less
    /// than their value, until nothing more fits.
    fn attach_leftovers(&mut self, rng: &mut SeededRandom) {
        loop {
            let mut progress = false;
            for pos in self.grid.positions() {
                if self.id_at(pos) != UNASSIGNED {
                    continue;
                }
                let value = usize::from(self.grid[pos]);
                let mut homes: Vec<usize> = self
                    .neighbor_regions(pos)
                    .into_iter()
                    .filter(|&id| self.regions[id].len() + 1 == value)
                    .collect();
                if let Some(&id) = rng.choose(&homes) {
                    self.assign(pos, id);
                    progress = true;
                }
            }
            if !progress {
                return;
            }
        }
    }

    /// Ways the empty cell `pos` can enter a region under the ripple rule.
    fn choices(&self, pos: Position) -> Vec<Choice> {
        let mut choices: Vec<Choice> = self
            .neighbor_regions(pos)
            .into_iter()
            .filter(|&id| {
                self.regions[id].len() < self.max_region
                    && !ripple_conflict(&self.grid, pos, self.next_value(id))
            })
            .map(Choice::Join)
            .collect();
        if !ripple_conflict(&self.grid, pos, 1) {
            choices.push(Choice::Open);
        }
        choices
    }

    /// [`choices`](Self::choices) in trial order: regions still below their
    /// target first, then a new region, then regions grown past their target.
    fn ordered_choices(&self, pos: Position, rng: &mut SeededRandom) -> Vec<Choice> {
        let mut below = Vec::new();
        let mut open = Vec::new();
        let mut past = Vec::new();
        for choice in self.choices(pos) {
            match choice {
                Choice::Join(id) if self.regions[id].len() < self.targets[id] => below.push(choice),
                Choice::Join(_) => past.push(choice),
                Choice::Open => open.push(choice),
            }
        }
        rng.shuffle(&mut below);
        rng.shuffle(&mut past);
        below.into_iter().chain(open).chain(past).collect()
    }

    fn place(&mut self, pos: Position, choice: Choice, rng: &mut SeededRandom) {
        match choice {
            Choice::Join(id) => {
                self.grid[pos] = self.next_value(id);
                self.assign(pos, id);
            }
            Choice::Open => {
                self.grid[pos] = 1;
                let target = pick_target_size(self.weights, rng);
                self.open(pos, target);
            }
        }
    }

    fn unplace(&mut self, pos: Position, choice: Choice) {
        match choice {
            Choice::Join(id) => {
                self.regions[id].pop();
            }
            Choice::Open => {
                self.regions.pop();
                self.targets.pop();
            }
        }
        let i = self.grid.index_of(pos);
        self.ids[i] = UNASSIGNED;
        self.grid.clear(pos);
    }

    /// Assigns every empty cell of `cells` to a region, most constrained
    /// cell first. Returns `false` once `nodes_left` runs out or every
    /// assignment has been tried; the carver is then back in its prior state.
    fn refill(
        &mut self,
        cells: &[Position],
        rng: &mut SeededRandom,
        budget: &mut SearchBudget,
        nodes_left: &mut u64,
    ) -> Result<bool, SynthesisError> {
        if !budget.tick() {
            return Err(SynthesisError::OutOfBudget);
        }
        if *nodes_left == 0 {
            return Ok(false);
        }
        *nodes_left -= 1;

        let mut best: Option<(Position, usize)> = None;
        for &pos in cells {
            if !self.grid.is_empty_at(pos) {
                continue;
            }
            let count = self.choices(pos).len();
            if count <= 1 {
                best = Some((pos, count));
                break;
            }
            if best.is_none_or(|(_, fewest)| count < fewest) {
                best = Some((pos, count));
            }
        }
        let Some((pos, _)) = best else {
            return Ok(true);
        };

        for choice in self.ordered_choices(pos, rng) {
            self.place(pos, choice, rng);
            if self.refill(cells, rng, budget, nodes_left)? {
                return Ok(true);
            }
            self.unplace(pos, choice);
        }
        Ok(false)
    }

    /// Dissolves every region touching `cells` and returns all unassigned cells.
    fn dissolve_around(&mut self, cells: &[Position]) -> Vec<Position> {
        let mut doomed: Vec<usize> = cells
            .iter()
            .flat_map(|&pos| self.neighbor_regions(pos))
            .collect();
        doomed.sort_unstable();
        doomed.dedup();
        for id in doomed {
            for pos in std::mem::take(&mut self.regions[id]) {
                let i = self.grid.index_of(pos);
                self.ids[i] = UNASSIGNED;
                self.grid.clear(pos);
            }
        }
        self.unassigned()
    }

    /// Refills the cells no region took, releasing more of the surrounding
    /// regions each time a refill gets stuck.
    fn settle_leftovers(
        &mut self,
        rng: &mut SeededRandom,
        budget: &mut SearchBudget,
    ) -> Result<(), SynthesisError> {
        let mut released = self.unassigned();
        let mut unbounded = false;
        while !released.is_empty() {
            for &pos in &released {
                self.grid.clear(pos);
            }
            unbounded |= released.len() == self.grid.len();
            let mut nodes_left = if unbounded {
                u64::MAX
            } else {
                REFILL_NODES_PER_CELL.saturating_mul(released.len() as u64)
            };
            if self.refill(&released, rng, budget, &mut nodes_left)? {
                return Ok(());
            }
            if unbounded {
                log::debug!("no region layout fits the released cells");
                return Err(SynthesisError::InvalidRooms);
            }
            log::trace!("refill of {} cells stuck, releasing neighbors", released.len());
            let grown = self.dissolve_around(&released);
            unbounded = grown.len() == released.len();
            released = grown;
        }
        Ok(())
    }

    fn carve(
        mut self,
        rng: &mut SeededRandom,
        budget: &mut SearchBudget,
    ) -> Result<(Grid, RegionMap), SynthesisError> {
        let mut seeds: Vec<Position> = self
            .grid
            .positions()
            .filter(|&pos| self.grid[pos] == 1)
            .collect();
        rng.shuffle(&mut seeds);
        for seed in seeds {
            if self.id_at(seed) == UNASSIGNED {
                self.grow(seed, rng);
            }
        }
        self.attach_leftovers(rng);
        self.settle_leftovers(rng, budget)?;

        let regions: Vec<Vec<Position>> = self
            .regions
            .into_iter()
            .filter(|cells| !cells.is_empty())
            .collect();
        let regions = RegionMap::from_regions(self.grid.rows(), self.grid.cols(), regions)
            .map_err(|err| {
                log::debug!("carved regions are malformed: {err}");
                SynthesisError::InvalidRooms
            })?;
        rules::validate_solution(&regions, &self.grid).map_err(|violation| {
            log::debug!("carved solution is invalid: {violation}");
            SynthesisError::InvalidRooms
        })?;
        Ok((self.grid, regions))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{PartitionStrategy, RegionPartitioner, partition::region_size_weights};

    fn unlimited() -> SolutionSynthesizer {
        SolutionSynthesizer::new(SearchLimits::unlimited())
    }

    #[test]
    fn test_region_first_single_region() {
        let regions = RegionMap::single(3, 4);
        let solution = unlimited()
            .region_first(&regions, &mut SeededRandom::new(8))
            .unwrap();
        assert_eq!(rules::validate_solution(&regions, &solution), Ok(()));
    }

    #[test]
    fn test_region_first_unsatisfiable() {
        // Two dominoes put two 1s and two 2s on a four-cell line.
        let regions = RegionMap::from_ids(1, 4, vec![0, 0, 1, 1]).unwrap();
        let err = unlimited()
            .region_first(&regions, &mut SeededRandom::new(1))
            .unwrap_err();
        assert_eq!(err, SynthesisError::Unsatisfiable);
    }

    #[test]
    fn test_region_first_out_of_budget() {
        let regions = RegionPartitioner::new(PartitionStrategy::RandomGrowth)
            .partition(9, 9, &mut SeededRandom::new(4))
            .unwrap();
        let err = SolutionSynthesizer::new(SearchLimits::with_node_limit(3))
            .region_first(&regions, &mut SeededRandom::new(4))
            .unwrap_err();
        assert_eq!(err, SynthesisError::OutOfBudget);
    }

    #[test]
    fn test_region_first_is_deterministic() {
        let regions = RegionPartitioner::new(PartitionStrategy::RandomGrowth)
            .partition(6, 6, &mut SeededRandom::new(21))
            .unwrap();
        let limits = SearchLimits::with_node_limit(200_000);
        let a = SolutionSynthesizer::new(limits).region_first(&regions, &mut SeededRandom::new(5));
        let b = SolutionSynthesizer::new(limits).region_first(&regions, &mut SeededRandom::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_solution_first_produces_valid_pair() {
        for side in [10, 12, 14] {
            let weights = region_size_weights(side, side);
            let synthesizer = SolutionSynthesizer::new(SearchLimits::with_node_limit(500_000));
            for seed in 0..3 {
                let (grid, regions) = synthesizer
                    .solution_first(
                        side,
                        side,
                        solution_first_value_cap(side),
                        weights,
                        &mut SeededRandom::new(seed),
                    )
                    .unwrap_or_else(|err| panic!("{side}x{side} seed {seed}: {err}"));
                assert_eq!(rules::validate_solution(&regions, &grid), Ok(()));
                assert!(regions.max_region_size() <= weights.len().max(5));
            }
        }
    }

    fn carve(
        rows: Vec<Vec<u8>>,
        max_region: usize,
        seed: u64,
    ) -> Result<(Grid, RegionMap), SynthesisError> {
        let grid = Grid::from_rows(rows).unwrap();
        RegionCarver::new(grid, &[1, 1], max_region).carve(
            &mut SeededRandom::new(seed),
            &mut SearchLimits::unlimited().start(),
        )
    }

    #[test]
    fn test_carve_opens_region_for_leftover() {
        let (grid, regions) = carve(vec![vec![2]], 2, 0).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1]]);
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_carve_releases_neighbors_when_stuck() {
        // The 2 left over next to the full domino can neither join it nor
        // become a 1, so the domino is released and the grid refilled.
        for seed in 0..8 {
            let (grid, regions) = carve(vec![vec![1, 2], vec![2, 9]], 2, seed).unwrap();
            assert_eq!(rules::validate_solution(&regions, &grid), Ok(()));
            assert_eq!(regions.max_region_size(), 2);
        }
    }

    #[test]
    fn test_carve_without_any_layout_is_invalid_rooms() {
        // Regions of at most two cells cannot tile a five-cell line.
        let err = carve(vec![vec![2, 1, 5, 1, 2]], 2, 0).unwrap_err();
        assert_eq!(err, SynthesisError::InvalidRooms);
    }

    #[test]
    fn test_value_cap() {
        assert_eq!(solution_first_value_cap(12), 5);
        assert_eq!(solution_first_value_cap(15), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_region_first_solutions_are_valid(seed: u64, rows in 2usize..7, cols in 2usize..7) {
            let regions = RegionPartitioner::new(PartitionStrategy::RandomGrowth)
                .partition(rows, cols, &mut SeededRandom::new(seed))
                .unwrap();
            let result = SolutionSynthesizer::new(SearchLimits::with_node_limit(100_000))
                .region_first(&regions, &mut SeededRandom::new(seed));
            if let Ok(solution) = result {
                prop_assert_eq!(rules::validate_solution(&regions, &solution), Ok(()));
            }
        }

        #[test]
        fn prop_solution_first_output_is_valid(seed: u64, side in 4usize..10) {
            let weights = region_size_weights(side, side);
            let result = SolutionSynthesizer::new(SearchLimits::with_node_limit(100_000))
                .solution_first(side, side, 4, weights, &mut SeededRandom::new(seed));
            if let Ok((grid, regions)) = result {
                prop_assert_eq!(rules::validate_solution(&regions, &grid), Ok(()));
            }
        }
    }
}
