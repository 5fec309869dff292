//! Rectangular value grids.
//!
//! A [`Grid`] stores one small value per cell in row-major order. The value
//! `0` marks an empty cell; every other value is a placed number. The same
//! type is used for synthesized solutions and for clue grids.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use crate::{GridError, Position, ValueSet};

/// The value stored in an empty cell.
pub const EMPTY: u8 = 0;

/// A `rows`×`cols` matrix of cell values, `0` meaning empty.
///
/// # Examples
///
/// ```
/// use ripple_core::{Grid, Position};
///
/// let mut grid = Grid::new(2, 3);
/// grid[Position::new(1, 2)] = 4;
///
/// assert_eq!(grid.filled_count(), 1);
/// assert_eq!(grid.to_string(), "...\n..4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid must not be empty");
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Builds a grid from row-major nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] for an empty input, [`GridError::RaggedRow`]
    /// when rows differ in length, and [`GridError::ValueTooLarge`] for values
    /// above [`ValueSet::MAX`].
    pub fn from_rows<R>(rows: Vec<R>) -> Result<Self, GridError>
    where
        R: AsRef<[u8]>,
    {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(GridError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            cells.extend_from_slice(values);
        }
        Self::from_cells(rows.len(), cols, cells)
    }

    /// Builds a grid from a row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellCountMismatch`] when `cells.len() != rows * cols`
    /// and [`GridError::ValueTooLarge`] for values above [`ValueSet::MAX`].
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != rows * cols {
            return Err(GridError::CellCountMismatch {
                expected: rows * cols,
                actual: cells.len(),
            });
        }
        if let Some(i) = cells.iter().position(|&v| v > ValueSet::MAX) {
            return Err(GridError::ValueTooLarge {
                pos: Position::new(i / cols, i % cols),
                value: cells[i],
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Number of rows.
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; grids have at least one cell.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of `pos`.
    #[must_use]
    #[inline]
    pub fn index_of(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{pos} outside {}x{}", self.rows, self.cols);
        pos.row * self.cols + pos.col
    }

    /// Position of the row-major index `i`.
    #[must_use]
    #[inline]
    pub fn position_of(&self, i: usize) -> Position {
        Position::new(i / self.cols, i % self.cols)
    }

    /// Returns the value at `pos`, or `None` if the cell is empty.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: Position) -> Option<u8> {
        let value = self[pos];
        (value != EMPTY).then_some(value)
    }

    /// Returns `true` if the cell at `pos` holds no value.
    #[must_use]
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self[pos] == EMPTY
    }

    /// Empties the cell at `pos`, returning its previous value.
    pub fn clear(&mut self, pos: Position) -> u8 {
        std::mem::replace(&mut self[pos], EMPTY)
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// Iterates over the positions of empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|&pos| self.is_empty_at(pos))
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }

    /// Returns `true` if no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != EMPTY)
    }

    /// Row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns the values of one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Copies the grid into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(<[u8]>::to_vec).collect()
    }
}

impl Index<Position> for Grid {
    type Output = u8;

    #[inline]
    fn index(&self, pos: Position) -> &u8 {
        &self.cells[self.index_of(pos)]
    }
}

impl IndexMut<Position> for Grid {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut u8 {
        let i = self.index_of(pos);
        &mut self.cells[i]
    }
}

impl fmt::Display for Grid {
    /// Writes one line per row. Empty cells are `.`, values above 9 use letters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &value in row {
                let c = match value {
                    EMPTY => '.',
                    v => char::from_digit(u32::from(v), 16)
                        .map_or('?', |c| c.to_ascii_uppercase()),
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![1]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert_eq!(
            Grid::from_rows(Vec::<Vec<u8>>::new()).unwrap_err(),
            GridError::Empty
        );
    }

    #[test]
    fn test_from_cells_rejects_large_value() {
        let err = Grid::from_cells(1, 2, vec![1, 16]).unwrap_err();
        assert!(matches!(err, GridError::ValueTooLarge { value: 16, .. }));
    }

    #[test]
    fn test_index_and_clear() {
        let mut grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let pos = Position::new(1, 1);
        assert_eq!(grid.get(pos), Some(5));
        assert_eq!(grid.clear(pos), 5);
        assert!(grid.is_empty_at(pos));
        assert_eq!(grid.get(pos), None);
        assert_eq!(grid.empty_positions().collect::<Vec<_>>(), vec![pos]);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_position_index_round_trip() {
        let grid = Grid::new(3, 4);
        for (i, pos) in grid.positions().enumerate() {
            assert_eq!(grid.index_of(pos), i);
            assert_eq!(grid.position_of(i), pos);
        }
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_rows(vec![vec![1, 0, 12]]).unwrap();
        assert_eq!(grid.to_string(), "1.C");
    }
}
