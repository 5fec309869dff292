//! Resumable progress records.

use std::{collections::BTreeMap, path::Path};

use ripple_generator::PuzzleKind;
use serde::{Deserialize, Serialize};

use crate::{BatchError, persist};

/// Progress of one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointEntry {
    /// Last seed whose attempt finished.
    pub last_seed: u64,
    /// Puzzles accepted so far, including those from earlier runs.
    pub count: usize,
    /// The configuration reached its target or ran out of seeds.
    pub complete: bool,
}

impl CheckpointEntry {
    /// The first seed a resumed run should try.
    #[must_use]
    pub fn resume_seed(&self, start_seed: u64) -> u64 {
        start_seed.max(self.last_seed.saturating_add(1))
    }

    /// Returns `true` if the configuration needs no more work for `target`
    /// puzzles in seeds below `seed_end`.
    ///
    /// An entry completed for a smaller target is reopened unless its seed
    /// range is already used up.
    #[must_use]
    pub fn is_finished(&self, target: usize, seed_end: u64) -> bool {
        self.complete && (self.count >= target || self.last_seed.saturating_add(1) >= seed_end)
    }
}

/// Checkpoint file contents: one entry per `<rows>x<cols>-<difficulty>` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checkpoint {
    entries: BTreeMap<String, CheckpointEntry>,
}

impl Checkpoint {
    /// Loads the checkpoint at `path`; a missing file is an empty checkpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, BatchError> {
        Ok(persist::read_json(path)?.unwrap_or_default())
    }

    /// Writes the checkpoint to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), BatchError> {
        persist::write_json_atomic(path, self)
    }

    /// The entry of `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: PuzzleKind) -> Option<&CheckpointEntry> {
        self.entries.get(&kind.to_string())
    }

    /// Replaces the entry of `kind`.
    pub fn set(&mut self, kind: PuzzleKind, entry: CheckpointEntry) {
        self.entries.insert(kind.to_string(), entry);
    }

    /// Returns `true` if every kind in `kinds` has a complete entry.
    #[must_use]
    pub fn all_complete(&self, kinds: &[PuzzleKind]) -> bool {
        kinds
            .iter()
            .all(|&kind| self.get(kind).is_some_and(|entry| entry.complete))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
