//! Region ("room") partitions of a grid.
//!
//! A [`RegionMap`] assigns every cell of a `rows`×`cols` grid to exactly one
//! [`Region`]. Regions are 4-connected and their ids are contiguous from 0.
//! Region maps are built once per generation attempt and never mutated.

use std::collections::VecDeque;

use crate::{GridError, Position, ValueSet};

/// A connected group of cells that must hold a permutation of `1..=size`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    id: usize,
    cells: Vec<Position>,
}

impl Region {
    /// Region id, equal to its index in [`RegionMap::regions`].
    #[must_use]
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Cells of the region in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells, which is also the largest value the region holds.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The set of values `1..=size` the region must contain.
    #[must_use]
    pub fn values(&self) -> ValueSet {
        #[expect(clippy::cast_possible_truncation)]
        let size = self.size() as u8;
        ValueSet::full(size)
    }
}

/// An exact partition of a grid into connected regions.
///
/// # Examples
///
/// ```
/// use ripple_core::{Position, RegionMap};
///
/// // An L-tromino and a single cell.
/// let map = RegionMap::from_ids(2, 2, vec![0, 0, 0, 1])?;
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.region_at(Position::new(1, 0)).size(), 3);
/// assert_eq!(map.max_region_size(), 3);
/// # Ok::<(), ripple_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionMap {
    rows: usize,
    cols: usize,
    ids: Vec<usize>,
    regions: Vec<Region>,
}

impl RegionMap {
    /// Builds a region map from a row-major vector of region ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions do not match, ids are not contiguous
    /// from 0, a region is disconnected, or a region is larger than
    /// [`ValueSet::MAX`].
    pub fn from_ids(rows: usize, cols: usize, ids: Vec<usize>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if ids.len() != rows * cols {
            return Err(GridError::CellCountMismatch {
                expected: rows * cols,
                actual: ids.len(),
            });
        }
        if let Some(i) = ids.iter().position(|&id| id >= rows * cols) {
            return Err(GridError::RegionIdOutOfRange {
                pos: Position::new(i / cols, i % cols),
                id: ids[i],
            });
        }
        let count = ids.iter().max().map_or(0, |&max| max + 1);
        let mut regions: Vec<Region> = (0..count)
            .map(|id| Region {
                id,
                cells: Vec::new(),
            })
            .collect();
        for (i, &id) in ids.iter().enumerate() {
            regions[id].cells.push(Position::new(i / cols, i % cols));
        }
        let map = Self {
            rows,
            cols,
            ids,
            regions,
        };
        map.validate()?;
        Ok(map)
    }

    /// Builds a region map from a list of regions, each given as its cells.
    ///
    /// Region `i` of the input gets id `i`. Cells inside each region are
    /// stored in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell is out of bounds, covered twice or not at
    /// all, or if a region is empty, disconnected, or too large.
    pub fn from_regions(
        rows: usize,
        cols: usize,
        regions: Vec<Vec<Position>>,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let mut ids = vec![usize::MAX; rows * cols];
        for (id, cells) in regions.iter().enumerate() {
            if cells.is_empty() {
                return Err(GridError::MissingRegionId { id });
            }
            for &pos in cells {
                if pos.row >= rows || pos.col >= cols {
                    return Err(GridError::OutOfBounds { pos, rows, cols });
                }
                let slot = &mut ids[pos.row * cols + pos.col];
                if *slot != usize::MAX {
                    return Err(GridError::NotAPartition { pos });
                }
                *slot = id;
            }
        }
        if let Some(i) = ids.iter().position(|&id| id == usize::MAX) {
            return Err(GridError::NotAPartition {
                pos: Position::new(i / cols, i % cols),
            });
        }
        Self::from_ids(rows, cols, ids)
    }

    /// A single region covering the whole grid.
    ///
    /// # Panics
    ///
    /// Panics if the grid has more cells than [`ValueSet::MAX`].
    #[must_use]
    pub fn single(rows: usize, cols: usize) -> Self {
        match Self::from_ids(rows, cols, vec![0; rows * cols]) {
            Ok(map) => map,
            Err(err) => panic!("cannot build a single {rows}x{cols} region: {err}"),
        }
    }

    fn validate(&self) -> Result<(), GridError> {
        for region in &self.regions {
            let Some(&start) = region.cells.first() else {
                return Err(GridError::MissingRegionId { id: region.id });
            };
            if region.size() > usize::from(ValueSet::MAX) {
                return Err(GridError::ValueTooLarge {
                    pos: start,
                    value: u8::try_from(region.size()).unwrap_or(u8::MAX),
                });
            }
            let mut seen = vec![false; self.ids.len()];
            let mut queue = VecDeque::from([start]);
            seen[self.index_of(start)] = true;
            let mut reached = 1;
            while let Some(pos) = queue.pop_front() {
                for next in pos.neighbors(self.rows, self.cols) {
                    let i = self.index_of(next);
                    if !seen[i] && self.ids[i] == region.id {
                        seen[i] = true;
                        reached += 1;
                        queue.push_back(next);
                    }
                }
            }
            if reached != region.size() {
                return Err(GridError::DisconnectedRegion { id: region.id });
            }
        }
        Ok(())
    }

    #[inline]
    fn index_of(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Number of rows of the underlying grid.
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns of the underlying grid.
    #[must_use]
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of regions.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always `false` for a valid map.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// All regions, indexed by id.
    #[must_use]
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region id of the cell at `pos`.
    #[must_use]
    #[inline]
    pub fn region_id(&self, pos: Position) -> usize {
        self.ids[self.index_of(pos)]
    }

    /// Region containing the cell at `pos`.
    #[must_use]
    #[inline]
    pub fn region_at(&self, pos: Position) -> &Region {
        &self.regions[self.region_id(pos)]
    }

    /// Size of the region containing `pos`.
    #[must_use]
    #[inline]
    pub fn region_size_at(&self, pos: Position) -> usize {
        self.region_at(pos).size()
    }

    /// Size of the largest region.
    #[must_use]
    pub fn max_region_size(&self) -> usize {
        self.regions.iter().map(Region::size).max().unwrap_or(0)
    }

    /// Row-major region ids.
    #[must_use]
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Copies the region ids into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.ids.chunks(self.cols).map(<[usize]>::to_vec).collect()
    }
}
