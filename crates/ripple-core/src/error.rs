use crate::Position;

/// Errors raised when building grids or region maps from raw data.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The grid has zero rows or zero columns.
    #[display("grid must have at least one row and one column")]
    Empty,
    /// A row has a different length than the first row.
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
    /// The number of cells does not match `rows * cols`.
    #[display("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A value does not fit in a [`ValueSet`](crate::ValueSet).
    #[display("value {value} at {pos} exceeds the supported maximum")]
    ValueTooLarge {
        /// Cell holding the value.
        pos: Position,
        /// The offending value.
        value: u8,
    },
    /// A region id cannot be valid because it is not below the cell count.
    #[display("region id {id} at {pos} is out of range")]
    RegionIdOutOfRange {
        /// Cell holding the id.
        pos: Position,
        /// The offending id.
        id: usize,
    },
    /// A region id is not used by any cell, so ids are not contiguous.
    #[display("region ids must be contiguous, id {id} is unused")]
    MissingRegionId {
        /// The unused id.
        id: usize,
    },
    /// A cell is listed in more than one region, or in none.
    #[display("cell {pos} is not covered by exactly one region")]
    NotAPartition {
        /// The offending cell.
        pos: Position,
    },
    /// A region is not connected under 4-neighbor adjacency.
    #[display("region {id} is not connected")]
    DisconnectedRegion {
        /// The offending region.
        id: usize,
    },
    /// A position lies outside the grid.
    #[display("position {pos} is outside a {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending position.
        pos: Position,
        /// Grid height.
        rows: usize,
        /// Grid width.
        cols: usize,
    },
}
