//! Random partitioning of a grid into regions.

use ripple_core::{GridError, Position, RegionMap, SeededRandom, rules};

const UNASSIGNED: usize = usize::MAX;

/// Relative weights of region target sizes, indexed by `size - 1`.
///
/// Larger grids favor smaller regions: the ripple rule gets harder to satisfy
/// as lines get longer and large values pile up.
#[must_use]
pub fn region_size_weights(rows: usize, cols: usize) -> &'static [u32] {
    match rows.max(cols) {
        0..=5 => &[1, 4, 6, 6, 4],
        6..=7 => &[1, 5, 7, 5, 3],
        8..=9 => &[1, 6, 7, 4, 1],
        _ => &[1, 7, 6, 3],
    }
}

/// Draws a region target size from [`region_size_weights`].
pub(crate) fn pick_target_size(weights: &[u32], rng: &mut SeededRandom) -> usize {
    rng.weighted_index(weights).map_or(1, |i| i + 1)
}

/// How a [`RegionPartitioner`] grows regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PartitionStrategy {
    /// Plain random flood fill.
    RandomGrowth,
    /// Random flood fill that refuses growth steps which would force more
    /// copies of a value onto one line than the ripple rule allows.
    SizeConstrained,
}

/// Partitions a grid into connected regions of bounded size.
///
/// Cells are visited in random order; each unassigned cell seeds a new region
/// with a random target size, which then grows into random unassigned
/// 4-neighbors until it reaches the target or runs out of room. Regions that
/// stop short of their target are kept as they are, except for single cells
/// that no filling could satisfy: a single cell next to another single-cell
/// region (two adjacent 1s), or, under
/// [`SizeConstrained`](PartitionStrategy::SizeConstrained), one that would put
/// more 1s on a line than the ripple rule allows. Such a cell is absorbed by a
/// neighboring region with room to spare when there is one.
///
/// # Examples
///
/// ```
/// use ripple_core::SeededRandom;
/// use ripple_generator::{PartitionStrategy, RegionPartitioner};
///
/// let partitioner = RegionPartitioner::new(PartitionStrategy::RandomGrowth);
/// let regions = partitioner.partition(6, 6, &mut SeededRandom::new(1))?;
/// assert_eq!(regions.ids().len(), 36);
/// assert!(regions.max_region_size() <= 5);
/// # Ok::<(), ripple_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RegionPartitioner {
    strategy: PartitionStrategy,
}

impl RegionPartitioner {
    /// Creates a partitioner using `strategy`.
    #[must_use]
    pub const fn new(strategy: PartitionStrategy) -> Self {
        Self { strategy }
    }

    /// The growth strategy.
    #[must_use]
    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Partitions a `rows`×`cols` grid.
    ///
    /// # Errors
    ///
    /// Returns an error only if the produced partition fails structural
    /// validation, which indicates a bug rather than bad luck.
    pub fn partition(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut SeededRandom,
    ) -> Result<RegionMap, GridError> {
        let weights = region_size_weights(rows, cols);
        let constrained = self.strategy.is_size_constrained();
        let mut state = PartitionState::new(rows, cols, weights.len());

        let mut order: Vec<Position> = (0..rows * cols)
            .map(|i| Position::new(i / cols, i % cols))
            .collect();
        rng.shuffle(&mut order);

        for start in order {
            if state.is_assigned(start) {
                continue;
            }
            let target = pick_target_size(weights, rng);
            let id = state.regions.len();
            let mut cells = vec![start];
            state.assign(start, id);

            while cells.len() < target {
                let mut frontier = state.frontier(&cells);
                if constrained {
                    frontier.retain(|&next| state.growth_allowed(&cells, next));
                }
                let Some(&next) = rng.choose(&frontier) else {
                    break;
                };
                state.assign(next, id);
                cells.push(next);
            }

            if cells.len() == 1
                && (state.touches_single_cell(start)
                    || (constrained && !state.growth_allowed(&[], start)))
                && state.absorb(start, constrained, rng)
            {
                continue;
            }
            state.confine(&cells, true);
            state.regions.push(cells);
        }

        RegionMap::from_regions(rows, cols, state.regions)
    }
}

struct PartitionState {
    rows: usize,
    cols: usize,
    max_size: usize,
    ids: Vec<usize>,
    regions: Vec<Vec<Position>>,
    /// `row_forced[r][v - 1]`: regions lying entirely in row `r` that must place `v` there.
    row_forced: Vec<Vec<usize>>,
    col_forced: Vec<Vec<usize>>,
}

impl PartitionState {
    fn new(rows: usize, cols: usize, max_size: usize) -> Self {
        Self {
            rows,
            cols,
            max_size,
            ids: vec![UNASSIGNED; rows * cols],
            regions: Vec::new(),
            row_forced: vec![vec![0; max_size]; rows],
            col_forced: vec![vec![0; max_size]; cols],
        }
    }

    fn id_at(&self, pos: Position) -> usize {
        self.ids[pos.row * self.cols + pos.col]
    }

    fn is_assigned(&self, pos: Position) -> bool {
        self.id_at(pos) != UNASSIGNED
    }

    fn assign(&mut self, pos: Position, id: usize) {
        self.ids[pos.row * self.cols + pos.col] = id;
    }

    /// Ids of committed regions next to `pos`, sorted and deduplicated.
    fn neighbor_regions(&self, pos: Position) -> Vec<usize> {
        let mut ids: Vec<usize> = pos
            .neighbors(self.rows, self.cols)
            .map(|n| self.id_at(n))
            .filter(|&id| id < self.regions.len())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Unassigned 4-neighbors of `cells`, sorted and deduplicated.
    fn frontier(&self, cells: &[Position]) -> Vec<Position> {
        let mut frontier: Vec<Position> = cells
            .iter()
            .flat_map(|pos| pos.neighbors(self.rows, self.cols))
            .filter(|&pos| !self.is_assigned(pos))
            .collect();
        frontier.sort_unstable();
        frontier.dedup();
        frontier
    }

    fn touches_single_cell(&self, pos: Position) -> bool {
        self.neighbor_regions(pos)
            .into_iter()
            .any(|id| self.regions[id].len() == 1)
    }

    /// Checks the line-capacity bound for the region `cells + next`.
    ///
    /// A region confined to one row must place all of `1..=size` in that row,
    /// so each value `v` takes one of the `max_occurrences_on_line(cols, v)`
    /// slots the ripple rule leaves on the row. Columns are checked likewise.
    /// With `cells` empty this checks `next` as a single-cell region.
    fn growth_allowed(&self, cells: &[Position], next: Position) -> bool {
        let size = cells.len() + 1;
        let in_row = cells.iter().all(|pos| pos.row == next.row);
        let in_col = cells.iter().all(|pos| pos.col == next.col);
        let fits = |forced: &[usize], line_len: usize| {
            (1..=size).all(|value| {
                let used = forced.get(value - 1).copied().unwrap_or(0);
                #[expect(clippy::cast_possible_truncation)]
                let value = value as u8;
                used < rules::max_occurrences_on_line(line_len, value)
            })
        };
        (!in_row || fits(&self.row_forced[next.row], self.cols))
            && (!in_col || fits(&self.col_forced[next.col], self.rows))
    }

    /// Adds (or with `add == false` removes) the line load of a committed region.
    fn confine(&mut self, cells: &[Position], add: bool) {
        let Some(first) = cells.first() else {
            return;
        };
        let size = cells.len();
        let mut lines = Vec::with_capacity(2);
        if cells.iter().all(|pos| pos.row == first.row) {
            lines.push(&mut self.row_forced[first.row]);
        }
        if cells.iter().all(|pos| pos.col == first.col) {
            lines.push(&mut self.col_forced[first.col]);
        }
        for line in lines {
            for count in &mut line[..size] {
                if add {
                    *count += 1;
                } else {
                    *count -= 1;
                }
            }
        }
    }

    /// Returns `true` if region `host` may take in `pos`.
    fn can_absorb(&mut self, host: usize, pos: Position, constrained: bool) -> bool {
        if self.regions[host].len() >= self.max_size {
            return false;
        }
        if !constrained {
            return true;
        }
        let cells = std::mem::take(&mut self.regions[host]);
        self.confine(&cells, false);
        let allowed = self.growth_allowed(&cells, pos);
        self.confine(&cells, true);
        self.regions[host] = cells;
        allowed
    }

    /// Moves the uncommitted single cell `pos` into a random neighboring
    /// region. Returns `false` if no neighbor can take it.
    fn absorb(&mut self, pos: Position, constrained: bool, rng: &mut SeededRandom) -> bool {
        let mut hosts = self.neighbor_regions(pos);
        hosts.retain(|&host| self.can_absorb(host, pos, constrained));
        let Some(&host) = rng.choose(&hosts) else {
            return false;
        };
        let mut cells = std::mem::take(&mut self.regions[host]);
        self.confine(&cells, false);
        cells.push(pos);
        self.confine(&cells, true);
        self.regions[host] = cells;
        self.assign(pos, host);
        true
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Every row- or column-confined region, single cells included, forces
    /// its values onto that line; no line may be forced past its capacity.
    fn line_forced_within_capacity(regions: &RegionMap) -> bool {
        let mut row_forced = vec![vec![0usize; 16]; regions.rows()];
        let mut col_forced = vec![vec![0usize; 16]; regions.cols()];
        for region in regions.regions() {
            let first = region.cells()[0];
            if region.cells().iter().all(|pos| pos.row == first.row) {
                for v in 1..=region.size() {
                    row_forced[first.row][v] += 1;
                }
            }
            if region.cells().iter().all(|pos| pos.col == first.col) {
                for v in 1..=region.size() {
                    col_forced[first.col][v] += 1;
                }
            }
        }
        let within = |forced: &[Vec<usize>], line_len: usize| {
            forced.iter().all(|counts| {
                counts.iter().enumerate().skip(1).all(|(v, &count)| {
                    count <= rules::max_occurrences_on_line(line_len, u8::try_from(v).unwrap())
                })
            })
        };
        within(&row_forced, regions.cols()) && within(&col_forced, regions.rows())
    }

    fn has_adjacent_single_cells(regions: &RegionMap) -> bool {
        regions.regions().iter().filter(|r| r.size() == 1).any(|region| {
            region.cells()[0]
                .neighbors(regions.rows(), regions.cols())
                .any(|n| regions.region_size_at(n) == 1)
        })
    }

    #[test]
    fn test_partition_is_deterministic() {
        let partitioner = RegionPartitioner::new(PartitionStrategy::RandomGrowth);
        let a = partitioner.partition(7, 7, &mut SeededRandom::new(99)).unwrap();
        let b = partitioner.partition(7, 7, &mut SeededRandom::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cell_grid() {
        let partitioner = RegionPartitioner::new(PartitionStrategy::SizeConstrained);
        let regions = partitioner.partition(1, 1, &mut SeededRandom::new(5)).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions.max_region_size(), 1);
    }

    #[test]
    fn test_size_constrained_respects_line_capacity() {
        let partitioner = RegionPartitioner::new(PartitionStrategy::SizeConstrained);
        for (rows, cols) in [(10, 10), (11, 11), (1, 10)] {
            for seed in 0..20 {
                let regions = partitioner
                    .partition(rows, cols, &mut SeededRandom::new(seed))
                    .unwrap();
                assert!(
                    line_forced_within_capacity(&regions),
                    "{rows}x{cols} seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_no_adjacent_single_cells() {
        let partitioner = RegionPartitioner::new(PartitionStrategy::RandomGrowth);
        for side in [8, 10] {
            for seed in 0..20 {
                let regions = partitioner
                    .partition(side, side, &mut SeededRandom::new(seed))
                    .unwrap();
                assert!(!has_adjacent_single_cells(&regions), "{side}x{side} seed {seed}");
            }
        }
    }

    #[test]
    fn test_weights_favor_small_regions_on_large_grids() {
        assert!(region_size_weights(12, 12).len() < region_size_weights(5, 5).len());
    }

    proptest! {
        #[test]
        fn prop_partition_is_valid(
            seed: u64,
            rows in 1usize..11,
            cols in 1usize..11,
            constrained: bool,
        ) {
            let strategy = if constrained {
                PartitionStrategy::SizeConstrained
            } else {
                PartitionStrategy::RandomGrowth
            };
            let regions = RegionPartitioner::new(strategy)
                .partition(rows, cols, &mut SeededRandom::new(seed))
                .unwrap();
            prop_assert_eq!(regions.ids().len(), rows * cols);
            prop_assert!(regions.max_region_size() <= region_size_weights(rows, cols).len());
        }
    }
}
