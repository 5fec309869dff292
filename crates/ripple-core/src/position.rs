//! Grid coordinates.

/// A cell coordinate on a rectangular grid.
///
/// Positions are ordered row-major, which is also the storage order of
/// [`Grid`](crate::Grid).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the 4-neighbors of this position that lie inside a `rows`×`cols` grid.
    ///
    /// Neighbors are yielded in up, left, right, down order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ripple_core::Position;
    ///
    /// let corner: Vec<_> = Position::new(0, 0).neighbors(3, 3).collect();
    /// assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);
    /// ```
    pub fn neighbors(self, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        let Self { row, col } = self;
        [
            (row > 0).then(|| Position::new(row - 1, col)),
            (col > 0).then(|| Position::new(row, col - 1)),
            (col + 1 < cols).then(|| Position::new(row, col + 1)),
            (row + 1 < rows).then(|| Position::new(row + 1, col)),
        ]
        .into_iter()
        .flatten()
    }
}
