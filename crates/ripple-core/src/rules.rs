//! Placement rules.
//!
//! Two rules constrain a grid:
//!
//! - **Region rule**: a region of size `N` holds each value `1..=N` exactly once.
//! - **Ripple rule**: two equal values `v` on the same row or column have at
//!   least `v` cells strictly between them, i.e. their distance is at least `v + 1`.
//!
//! The functions here check single placements (used inside the search loops)
//! and whole grids (used to validate results).

use crate::{Grid, Position, RegionMap, ValueSet};

/// A rule broken by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RuleViolation {
    /// The grid and the region map have different dimensions.
    #[display("grid is {grid_rows}x{grid_cols} but regions are {region_rows}x{region_cols}")]
    ShapeMismatch {
        /// Grid height.
        grid_rows: usize,
        /// Grid width.
        grid_cols: usize,
        /// Region map height.
        region_rows: usize,
        /// Region map width.
        region_cols: usize,
    },
    /// A cell that must be filled is empty.
    #[display("cell {pos} is empty")]
    EmptyCell {
        /// The empty cell.
        pos: Position,
    },
    /// A value is larger than the size of its region.
    #[display("value {value} at {pos} exceeds region size {region_size}")]
    ValueOutOfRange {
        /// The offending cell.
        pos: Position,
        /// Its value.
        value: u8,
        /// Size of its region.
        region_size: usize,
    },
    /// A value appears twice in one region.
    #[display("value {value} repeats in region {region}")]
    DuplicateInRegion {
        /// Region id.
        region: usize,
        /// The repeated value.
        value: u8,
    },
    /// Two equal values on a line are too close.
    #[display("value {value} at {first} and {second} breaks the ripple distance")]
    RippleConflict {
        /// The earlier cell (row-major).
        first: Position,
        /// The later cell.
        second: Position,
        /// The shared value.
        value: u8,
    },
}

/// Maximum number of times `value` can appear on a line of `line_len` cells
/// without breaking the ripple rule.
///
/// # Examples
///
/// ```
/// use ripple_core::rules::max_occurrences_on_line;
///
/// assert_eq!(max_occurrences_on_line(5, 1), 3); // 1 . 1 . 1
/// assert_eq!(max_occurrences_on_line(5, 4), 1);
/// assert_eq!(max_occurrences_on_line(10, 4), 2);
/// ```
#[must_use]
pub fn max_occurrences_on_line(line_len: usize, value: u8) -> usize {
    let value = usize::from(value);
    (line_len + value) / (value + 1)
}

/// Returns `true` if placing `value` at `pos` would put it within ripple
/// distance of an equal value on the same row or column.
///
/// The cell at `pos` itself is ignored.
#[must_use]
pub fn ripple_conflict(grid: &Grid, pos: Position, value: u8) -> bool {
    let reach = usize::from(value);
    let Position { row, col } = pos;
    for d in 1..=reach {
        let hits = [
            (col >= d).then(|| Position::new(row, col - d)),
            (col + d < grid.cols()).then(|| Position::new(row, col + d)),
            (row >= d).then(|| Position::new(row - d, col)),
            (row + d < grid.rows()).then(|| Position::new(row + d, col)),
        ];
        if hits.into_iter().flatten().any(|other| grid[other] == value) {
            return true;
        }
    }
    false
}

/// Values already placed in the region of `pos`, excluding `pos` itself.
#[must_use]
pub fn used_in_region(grid: &Grid, regions: &RegionMap, pos: Position) -> ValueSet {
    regions
        .region_at(pos)
        .cells()
        .iter()
        .filter(|&&cell| cell != pos)
        .filter_map(|&cell| grid.get(cell))
        .collect()
}

/// Returns `true` if `value` may be placed at `pos` given the other cells.
#[must_use]
pub fn is_placeable(grid: &Grid, regions: &RegionMap, pos: Position, value: u8) -> bool {
    regions.region_at(pos).values().contains(value)
        && !used_in_region(grid, regions, pos).contains(value)
        && !ripple_conflict(grid, pos, value)
}

/// All values that may be placed at `pos` given the other cells.
#[must_use]
pub fn candidates(grid: &Grid, regions: &RegionMap, pos: Position) -> ValueSet {
    regions
        .region_at(pos)
        .values()
        .difference(used_in_region(grid, regions, pos))
        .iter()
        .filter(|&value| !ripple_conflict(grid, pos, value))
        .collect()
}

/// Checks that the filled cells of a possibly partial grid break no rule.
///
/// Empty cells are ignored.
///
/// # Errors
///
/// Returns the first violation found, scanning cells in row-major order.
pub fn check_consistent(regions: &RegionMap, grid: &Grid) -> Result<(), RuleViolation> {
    if grid.rows() != regions.rows() || grid.cols() != regions.cols() {
        return Err(RuleViolation::ShapeMismatch {
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
            region_rows: regions.rows(),
            region_cols: regions.cols(),
        });
    }

    let mut seen = vec![ValueSet::new(); regions.len()];
    for pos in grid.positions() {
        let Some(value) = grid.get(pos) else {
            continue;
        };
        let region = regions.region_at(pos);
        if !region.values().contains(value) {
            return Err(RuleViolation::ValueOutOfRange {
                pos,
                value,
                region_size: region.size(),
            });
        }
        if !seen[region.id()].insert(value) {
            return Err(RuleViolation::DuplicateInRegion {
                region: region.id(),
                value,
            });
        }
        // Only look right and down; the other directions were covered by earlier cells.
        for d in 1..=usize::from(value) {
            for second in [
                Position::new(pos.row, pos.col + d),
                Position::new(pos.row + d, pos.col),
            ] {
                if grid.contains(second) && grid[second] == value {
                    return Err(RuleViolation::RippleConflict {
                        first: pos,
                        second,
                        value,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Checks that `grid` is a complete, valid solution for `regions`.
///
/// # Errors
///
/// Returns [`RuleViolation::EmptyCell`] for the first empty cell, otherwise
/// the first violation reported by [`check_consistent`].
pub fn validate_solution(regions: &RegionMap, grid: &Grid) -> Result<(), RuleViolation> {
    check_consistent(regions, grid)?;
    if let Some(pos) = grid.empty_positions().next() {
        return Err(RuleViolation::EmptyCell { pos });
    }
    Ok(())
}
