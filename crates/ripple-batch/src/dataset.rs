//! The output dataset read by the puzzle player.

use std::{collections::BTreeMap, path::Path};

use chrono::{SecondsFormat, Utc};
use ripple_core::Grid;
use ripple_generator::{GeneratedPuzzle, ParseKindError, PuzzleKind};
use serde::{Deserialize, Serialize};

use crate::{BatchError, persist};

/// Dataset name written to every output file.
pub const DATASET_NAME: &str = "Ripple Effect";

/// One accepted puzzle as stored in the dataset.
///
/// Field names are part of the file format consumed by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    /// `<rows>x<cols>-<difficulty>-<seed>`.
    pub id: String,
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// `easy`, `medium` or `hard`.
    pub difficulty: String,
    /// Seed that reproduces the puzzle.
    pub seed: u64,
    /// Row-major clues; hidden cells are `null`.
    pub clues: Vec<Vec<Option<u8>>>,
    /// Row-major region ids.
    pub regions: Vec<Vec<usize>>,
    /// Cells of each region as `[row, col]` pairs, keyed by region id.
    pub region_cells: BTreeMap<usize, Vec<[usize; 2]>>,
    /// Row-major solution.
    pub solution: Vec<Vec<u8>>,
    /// Number of revealed cells.
    pub clue_count: usize,
    /// Number of regions.
    pub room_count: usize,
}

impl PuzzleRecord {
    /// The record id of the puzzle of `kind` generated from `seed`.
    #[must_use]
    pub fn make_id(kind: PuzzleKind, seed: u64) -> String {
        format!("{kind}-{seed}")
    }

    /// The configuration this puzzle belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if `difficulty` is not a known tier.
    pub fn kind(&self) -> Result<PuzzleKind, ParseKindError> {
        Ok(PuzzleKind::new(self.rows, self.cols, self.difficulty.parse()?))
    }
}

fn clue_rows(clues: &Grid) -> Vec<Vec<Option<u8>>> {
    (0..clues.rows())
        .map(|row| {
            clues
                .row(row)
                .iter()
                .map(|&value| (value != ripple_core::grid::EMPTY).then_some(value))
                .collect()
        })
        .collect()
}

impl From<&GeneratedPuzzle> for PuzzleRecord {
    fn from(puzzle: &GeneratedPuzzle) -> Self {
        let region_cells = puzzle
            .regions
            .regions()
            .iter()
            .map(|region| {
                let cells = region.cells().iter().map(|pos| [pos.row, pos.col]).collect();
                (region.id(), cells)
            })
            .collect();
        Self {
            id: Self::make_id(puzzle.kind, puzzle.seed),
            rows: puzzle.kind.rows,
            cols: puzzle.kind.cols,
            difficulty: puzzle.kind.difficulty.to_string(),
            seed: puzzle.seed,
            clues: clue_rows(&puzzle.clues),
            regions: puzzle.regions.to_rows(),
            region_cells,
            solution: puzzle.solution.to_rows(),
            clue_count: puzzle.clue_count(),
            room_count: puzzle.regions.len(),
        }
    }
}

/// The whole output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Always [`DATASET_NAME`].
    pub name: String,
    /// Human readable description of the sweep.
    pub description: String,
    /// RFC 3339 UTC timestamp of the last write.
    pub generated: String,
    /// Number of puzzles.
    pub count: usize,
    /// Accepted puzzles, in acceptance order.
    pub puzzles: Vec<PuzzleRecord>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            name: DATASET_NAME.to_owned(),
            description: description.into(),
            generated: now(),
            count: 0,
            puzzles: Vec::new(),
        }
    }

    /// Loads the dataset at `path`, or returns `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, BatchError> {
        persist::read_json(path)
    }

    /// Writes the dataset to `path`, refreshing `count` and `generated`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self, path: &Path) -> Result<(), BatchError> {
        self.count = self.puzzles.len();
        self.generated = now();
        persist::write_json_atomic(path, self)
    }

    /// Appends an accepted puzzle.
    pub fn push(&mut self, record: PuzzleRecord) {
        self.puzzles.push(record);
        self.count = self.puzzles.len();
    }

    /// Iterates over the records of `kind`.
    pub fn puzzles_of(&self, kind: PuzzleKind) -> impl Iterator<Item = &PuzzleRecord> {
        self.puzzles
            .iter()
            .filter(move |record| record.kind().is_ok_and(|k| k == kind))
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
