use std::{fs, path::PathBuf};

use ripple_core::{Grid, RegionMap};
use ripple_generator::{GeneratedPuzzle, PuzzleKind};

/// A fresh, empty directory under the system temp dir, unique per test name and process.
pub(crate) fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ripple-batch-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A valid 2x2 puzzle (two horizontal dominoes, one clue hidden) labeled with `kind` and `seed`.
pub(crate) fn sample_puzzle(kind: PuzzleKind, seed: u64) -> GeneratedPuzzle {
    GeneratedPuzzle {
        kind,
        seed,
        clues: Grid::from_rows(vec![vec![1, 0], vec![2, 1]]).unwrap(),
        regions: RegionMap::from_ids(2, 2, vec![0, 0, 1, 1]).unwrap(),
        solution: Grid::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap(),
    }
}
