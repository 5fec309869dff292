//! Batch generation of Ripple Effect puzzle datasets.
//!
//! [`BatchDriver`] sweeps seeds over a list of puzzle configurations, runs one
//! generation attempt per seed through an [`AttemptRunner`] (normally a
//! [`PuzzleGenerator`](ripple_generator::PuzzleGenerator)), and appends every
//! accepted puzzle to a JSON [`Dataset`]. Progress is saved to a
//! [`Checkpoint`] so an interrupted run resumes where it stopped.
//!
//! Both files are rewritten whole through a temporary file and a rename; see
//! [`persist`].

pub use self::{
    checkpoint::{Checkpoint, CheckpointEntry},
    dataset::{DATASET_NAME, Dataset, PuzzleRecord},
    driver::{AttemptRunner, BatchConfig, BatchDriver, DEFAULT_SIZES},
    error::BatchError,
    report::{BatchSummary, ConfigReport},
    shutdown::ShutdownFlag,
};

mod checkpoint;
mod dataset;
mod driver;
mod error;
pub mod persist;
mod report;
mod shutdown;

#[cfg(test)]
mod testing;
