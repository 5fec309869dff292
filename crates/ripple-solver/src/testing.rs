//! Fixture helpers shared by the solver tests.

use ripple_core::{Grid, RegionMap};

/// Builds a grid from literal rows.
pub(crate) fn grid(rows: &[&[u8]]) -> Grid {
    Grid::from_rows(rows.to_vec()).unwrap()
}

/// Builds a region map from literal rows of region ids.
pub(crate) fn regions(rows: &[&[usize]]) -> RegionMap {
    let cols = rows[0].len();
    let ids = rows.iter().flat_map(|row| row.iter().copied()).collect();
    RegionMap::from_ids(rows.len(), cols, ids).unwrap()
}
