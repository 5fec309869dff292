//! The seed-sweeping batch loop.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    thread,
    time::Instant,
};

use ripple_generator::{Difficulty, GeneratedPuzzle, PuzzleGenerator, PuzzleKind, RejectReason};

use crate::{
    BatchError, BatchSummary, Checkpoint, CheckpointEntry, ConfigReport, Dataset, PuzzleRecord,
    ShutdownFlag, persist,
};

/// Sizes swept when none are given.
pub const DEFAULT_SIZES: [(usize, usize); 5] = [(5, 5), (6, 6), (7, 7), (8, 8), (10, 10)];

/// Runs one generation attempt.
///
/// This is the seam between the driver and the generation pipeline.
pub trait AttemptRunner {
    /// Runs the attempt for `(kind, seed)`.
    ///
    /// # Errors
    ///
    /// Returns the reason the attempt was rejected.
    fn run_attempt(
        &mut self,
        kind: PuzzleKind,
        seed: u64,
    ) -> Result<GeneratedPuzzle, RejectReason>;
}

impl AttemptRunner for PuzzleGenerator {
    fn run_attempt(
        &mut self,
        kind: PuzzleKind,
        seed: u64,
    ) -> Result<GeneratedPuzzle, RejectReason> {
        self.generate_with_seed(kind, seed)
    }
}

/// Settings of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Configurations, processed in order.
    pub kinds: Vec<PuzzleKind>,
    /// Puzzles wanted per configuration.
    pub target_count: usize,
    /// First seed of every configuration.
    pub start_seed: u64,
    /// Seeds tried per configuration; the range is `start_seed..start_seed + seeds_per_config`.
    pub seeds_per_config: u64,
    /// Dataset file.
    pub output: PathBuf,
    /// Checkpoint file.
    pub checkpoint: PathBuf,
    /// Save after this many new puzzles.
    pub save_every: usize,
    /// Configurations whose longer side is at least this save after every puzzle.
    pub eager_save_side: usize,
    /// Log a progress line every this many seeds.
    pub progress_interval: u64,
    /// Yield the thread every this many seeds.
    pub yield_interval: u64,
}

impl BatchConfig {
    /// A configuration with default settings writing to `output`.
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        let output = output.into();
        Self {
            kinds: Self::default_kinds(),
            target_count: 1000,
            start_seed: 1,
            seeds_per_config: 500_000,
            checkpoint: Self::checkpoint_path_for(&output),
            output,
            save_every: 10,
            eager_save_side: 10,
            progress_interval: 500,
            yield_interval: 100,
        }
    }

    /// The default sweep: every default size at every difficulty.
    #[must_use]
    pub fn default_kinds() -> Vec<PuzzleKind> {
        Self::sweep(&DEFAULT_SIZES, &Difficulty::ALL)
    }

    /// Every combination of `sizes` and `difficulties`, sizes outermost.
    #[must_use]
    pub fn sweep(sizes: &[(usize, usize)], difficulties: &[Difficulty]) -> Vec<PuzzleKind> {
        sizes
            .iter()
            .flat_map(|&(rows, cols)| {
                difficulties
                    .iter()
                    .map(move |&difficulty| PuzzleKind::new(rows, cols, difficulty))
            })
            .collect()
    }

    /// `<output>.checkpoint.json`.
    #[must_use]
    pub fn checkpoint_path_for(output: &Path) -> PathBuf {
        let mut name = output.as_os_str().to_owned();
        name.push(".checkpoint.json");
        PathBuf::from(name)
    }

    /// Number of new puzzles between saves for `kind`.
    #[must_use]
    pub fn save_cadence(&self, kind: PuzzleKind) -> usize {
        if kind.side() >= self.eager_save_side {
            1
        } else {
            self.save_every.max(1)
        }
    }

    /// Exclusive upper bound of the seed range.
    #[must_use]
    pub fn seed_end(&self) -> u64 {
        self.start_seed.saturating_add(self.seeds_per_config)
    }

    fn validate(&self) -> Result<(), BatchError> {
        if self.kinds.is_empty() {
            return Err(BatchError::Config("no puzzle configurations".to_owned()));
        }
        if let Some(kind) = self.kinds.iter().find(|kind| kind.rows == 0 || kind.cols == 0) {
            return Err(BatchError::Config(format!("empty grid size in {kind}")));
        }
        if self.output == self.checkpoint {
            return Err(BatchError::Config(
                "output and checkpoint must be different files".to_owned(),
            ));
        }
        Ok(())
    }

    fn description(&self) -> String {
        let keys: Vec<String> = self.kinds.iter().map(ToString::to_string).collect();
        format!(
            "Uniquely solvable Ripple Effect puzzles, up to {} per configuration ({})",
            self.target_count,
            keys.join(", ")
        )
    }
}

/// Sweeps seeds for every configuration and persists accepted puzzles.
///
/// Configurations run one after another. For each, the driver resumes after
/// the checkpoint's last seed, skips seeds already in the dataset, and runs
/// attempts until the target is reached or the seed range is exhausted. The
/// dataset and checkpoint are rewritten every few accepted puzzles and at the
/// end of each configuration, so an interrupted run loses no accepted puzzle
/// older than the last save.
///
/// Shutdown requests are honored between attempts.
#[derive(Debug)]
pub struct BatchDriver<R> {
    config: BatchConfig,
    runner: R,
    shutdown: ShutdownFlag,
    dataset: Dataset,
    checkpoint: Checkpoint,
}

impl<R> BatchDriver<R>
where
    R: AttemptRunner,
{
    /// Creates a driver, loading any dataset and checkpoint left by an earlier run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable, or if an existing
    /// dataset or checkpoint cannot be read.
    pub fn new(
        config: BatchConfig,
        runner: R,
        shutdown: ShutdownFlag,
    ) -> Result<Self, BatchError> {
        config.validate()?;
        let dataset = match Dataset::load(&config.output)? {
            Some(mut dataset) => {
                log::info!(
                    "loaded {} puzzles from {}",
                    dataset.puzzles.len(),
                    config.output.display()
                );
                dataset.description = config.description();
                dataset
            }
            None => Dataset::new(config.description()),
        };
        let checkpoint = Checkpoint::load(&config.checkpoint)?;
        if !checkpoint.is_empty() {
            log::info!(
                "resuming from {} ({} configurations)",
                config.checkpoint.display(),
                checkpoint.len()
            );
        }
        Ok(Self {
            config,
            runner,
            shutdown,
            dataset,
            checkpoint,
        })
    }

    /// The accumulated dataset.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Consumes the driver, returning its runner.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Runs every configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset or checkpoint cannot be written.
    pub fn run(&mut self) -> Result<BatchSummary, BatchError> {
        let mut summary = BatchSummary::default();
        let kinds = self.config.kinds.clone();
        for kind in kinds {
            if self.shutdown.is_requested() {
                summary.interrupted = true;
                break;
            }
            let report = self.run_config(kind)?;
            if !report.complete {
                summary.interrupted = true;
            }
            summary.reports.push(report);
        }

        if !summary.interrupted && self.checkpoint.all_complete(&self.config.kinds) {
            persist::remove_if_exists(&self.config.checkpoint)?;
            log::info!("all configurations complete, removed checkpoint");
        }
        for report in summary.shortfalls() {
            log::warn!(
                "{}: seed range exhausted {} short of the target",
                report.kind,
                report.shortfall()
            );
        }
        Ok(summary)
    }

    fn save(&mut self) -> Result<(), BatchError> {
        self.dataset.save(&self.config.output)?;
        self.checkpoint.save(&self.config.checkpoint)
    }

    fn run_config(&mut self, kind: PuzzleKind) -> Result<ConfigReport, BatchError> {
        let started = Instant::now();
        let target = self.config.target_count;
        let end = self.config.seed_end();
        let cadence = self.config.save_cadence(kind);

        let known_seeds: BTreeSet<u64> = self
            .dataset
            .puzzles_of(kind)
            .map(|record| record.seed)
            .collect();
        let entry = self.checkpoint.get(kind).copied();
        let mut report = ConfigReport::new(kind, target);
        report.accepted = known_seeds.len();

        if entry.is_some_and(|entry| entry.is_finished(target, end)) {
            log::info!("{kind}: already complete ({}/{target})", report.accepted);
            report.complete = true;
            return Ok(report);
        }

        let mut seed = entry.map_or(self.config.start_seed, |entry| {
            entry.resume_seed(self.config.start_seed)
        });
        let mut last_seed = entry.map(|entry| entry.last_seed);
        let mut unsaved = 0;
        log::info!(
            "{kind}: starting at seed {seed} with {}/{target} accepted",
            report.accepted
        );

        while report.accepted < target && seed < end {
            if self.shutdown.is_requested() {
                log::info!("{kind}: shutdown requested, stopping before seed {seed}");
                break;
            }
            if known_seeds.contains(&seed) {
                report.seeds_skipped += 1;
            } else {
                match self.runner.run_attempt(kind, seed) {
                    Ok(puzzle) => {
                        self.dataset.push(PuzzleRecord::from(&puzzle));
                        report.accepted += 1;
                        report.new_puzzles += 1;
                        unsaved += 1;
                    }
                    Err(reason) => report.record_rejection(reason),
                }
                report.seeds_tried += 1;
            }
            last_seed = Some(seed);
            seed += 1;
            report.elapsed = started.elapsed();

            if unsaved >= cadence {
                self.record_progress(kind, last_seed, report.accepted, false);
                self.save()?;
                unsaved = 0;
                log::info!("{}", report.progress_line(seed));
            } else if report.seeds_visited() % self.config.progress_interval.max(1) == 0 {
                log::info!("{}", report.progress_line(seed));
            }
            if report.seeds_visited() % self.config.yield_interval.max(1) == 0 {
                thread::yield_now();
            }
        }

        report.elapsed = started.elapsed();
        report.complete = report.accepted >= target || seed >= end;
        self.record_progress(kind, last_seed, report.accepted, report.complete);
        self.save()?;
        log::info!("{report}");
        Ok(report)
    }

    fn record_progress(
        &mut self,
        kind: PuzzleKind,
        last_seed: Option<u64>,
        count: usize,
        complete: bool,
    ) {
        let last_seed = match last_seed {
            Some(seed) => seed,
            // Nothing ran; only a finished configuration needs an entry.
            None if complete => self.config.start_seed.saturating_sub(1),
            None => return,
        };
        self.checkpoint.set(
            kind,
            CheckpointEntry {
                last_seed,
                count,
                complete,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::testing::{sample_puzzle, temp_dir};

    /// Accepts every seed not divisible by 3 and records every call.
    #[derive(Debug, Default)]
    struct RecordingRunner {
        calls: Vec<(PuzzleKind, u64)>,
        stop_after: Option<(usize, ShutdownFlag)>,
    }

    impl AttemptRunner for RecordingRunner {
        fn run_attempt(
            &mut self,
            kind: PuzzleKind,
            seed: u64,
        ) -> Result<GeneratedPuzzle, RejectReason> {
            self.calls.push((kind, seed));
            if let Some((limit, flag)) = &self.stop_after
                && self.calls.len() >= *limit
            {
                flag.request();
            }
            if seed % 3 == 0 {
                Err(RejectReason::NotUnique)
            } else {
                Ok(sample_puzzle(kind, seed))
            }
        }
    }

    fn seeds(runner: &RecordingRunner) -> Vec<u64> {
        runner.calls.iter().map(|&(_, seed)| seed).collect()
    }

    fn config(dir: &Path, kinds: Vec<PuzzleKind>, target: usize) -> BatchConfig {
        BatchConfig {
            kinds,
            target_count: target,
            ..BatchConfig::new(dir.join("puzzles.json"))
        }
    }

    fn easy() -> PuzzleKind {
        PuzzleKind::new(2, 2, Difficulty::Easy)
    }

    fn hard() -> PuzzleKind {
        PuzzleKind::new(2, 2, Difficulty::Hard)
    }

    fn run(
        config: &BatchConfig,
        runner: RecordingRunner,
        shutdown: ShutdownFlag,
    ) -> (BatchSummary, RecordingRunner) {
        let mut driver = BatchDriver::new(config.clone(), runner, shutdown).unwrap();
        let summary = driver.run().unwrap();
        (summary, driver.into_runner())
    }

    #[test]
    fn test_runs_until_target() {
        let dir = temp_dir("driver-target");
        let config = config(&dir, vec![easy(), hard()], 3);
        let (summary, runner) = run(&config, RecordingRunner::default(), ShutdownFlag::new());

        assert_eq!(seeds(&runner), [1, 2, 3, 4, 1, 2, 3, 4]);
        assert!(!summary.interrupted);
        assert_eq!(summary.total_accepted(), 6);
        let report = &summary.reports[0];
        assert!(report.complete);
        assert_eq!(report.seeds_tried, 4);
        assert_eq!(report.rejections[&RejectReason::NotUnique], 1);

        let dataset = Dataset::load(&config.output).unwrap().unwrap();
        assert_eq!(dataset.count, 6);
        assert_eq!(dataset.puzzles[2].id, "2x2-easy-4");
        assert!(!config.checkpoint.exists());
    }

    #[test]
    fn test_seed_range_exhaustion_is_a_shortfall() {
        let dir = temp_dir("driver-shortfall");
        let config = BatchConfig {
            seeds_per_config: 4,
            ..config(&dir, vec![easy()], 10)
        };
        let (summary, runner) = run(&config, RecordingRunner::default(), ShutdownFlag::new());

        assert_eq!(seeds(&runner), [1, 2, 3, 4]);
        let report = &summary.reports[0];
        assert!(report.complete);
        assert_eq!(report.accepted, 3);
        assert_eq!(summary.shortfalls().count(), 1);
        assert!(summary.to_string().contains("(short by 7)"));
        assert!(!config.checkpoint.exists());
    }

    #[test]
    fn test_resume_after_interrupt() {
        let dir = temp_dir("driver-resume");
        let config = config(&dir, vec![easy()], 5);

        let shutdown = ShutdownFlag::new();
        let runner = RecordingRunner {
            stop_after: Some((2, shutdown.clone())),
            ..RecordingRunner::default()
        };
        let (summary, runner) = run(&config, runner, shutdown);
        assert!(summary.interrupted);
        assert_eq!(seeds(&runner), [1, 2]);
        let checkpoint = Checkpoint::load(&config.checkpoint).unwrap();
        assert_eq!(
            checkpoint.get(easy()),
            Some(&CheckpointEntry {
                last_seed: 2,
                count: 2,
                complete: false,
            })
        );

        let (summary, runner) = run(&config, RecordingRunner::default(), ShutdownFlag::new());
        assert!(!summary.interrupted);
        assert_eq!(seeds(&runner), [3, 4, 5, 6, 7]);
        let dataset = Dataset::load(&config.output).unwrap().unwrap();
        let accepted: Vec<u64> = dataset.puzzles.iter().map(|p| p.seed).collect();
        assert_eq!(accepted, [1, 2, 4, 5, 7]);
        assert!(!config.checkpoint.exists());
    }

    #[test]
    fn test_dataset_seeds_are_not_regenerated() {
        let dir = temp_dir("driver-known-seeds");
        let first = config(&dir, vec![easy()], 1);
        run(&first, RecordingRunner::default(), ShutdownFlag::new());

        let second = config(&dir, vec![easy()], 3);
        let (summary, runner) = run(&second, RecordingRunner::default(), ShutdownFlag::new());
        assert_eq!(seeds(&runner), [2, 3, 4]);
        assert_eq!(summary.reports[0].accepted, 3);
        assert_eq!(summary.reports[0].new_puzzles, 2);
        assert_eq!(summary.reports[0].seeds_skipped, 1);
        assert_eq!(summary.reports[0].seeds_visited(), 4);
    }

    #[test]
    fn test_raised_target_reopens_complete_entry() {
        let dir = temp_dir("driver-raised-target");
        let first = config(&dir, vec![easy()], 2);
        run(&first, RecordingRunner::default(), ShutdownFlag::new());

        let mut checkpoint = Checkpoint::default();
        checkpoint.set(
            easy(),
            CheckpointEntry {
                last_seed: 2,
                count: 2,
                complete: true,
            },
        );
        checkpoint.save(&first.checkpoint).unwrap();

        let raised = config(&dir, vec![easy()], 4);
        let (summary, runner) = run(&raised, RecordingRunner::default(), ShutdownFlag::new());
        assert_eq!(seeds(&runner), [3, 4, 5]);
        assert_eq!(summary.reports[0].accepted, 4);
        assert!(summary.reports[0].complete);
    }

    #[test]
    fn test_shutdown_before_start_runs_nothing() {
        let dir = temp_dir("driver-preset-shutdown");
        let config = config(&dir, vec![easy(), hard()], 3);
        let shutdown = ShutdownFlag::new();
        shutdown.request();
        let (summary, runner) = run(&config, RecordingRunner::default(), shutdown);

        assert!(summary.interrupted);
        assert!(summary.reports.is_empty());
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_complete_entries_are_skipped() {
        let dir = temp_dir("driver-complete-entry");
        let config = config(&dir, vec![easy(), hard()], 2);
        let mut checkpoint = Checkpoint::default();
        checkpoint.set(
            easy(),
            CheckpointEntry {
                last_seed: 100,
                count: 2,
                complete: true,
            },
        );
        checkpoint.save(&config.checkpoint).unwrap();

        let (summary, runner) = run(&config, RecordingRunner::default(), ShutdownFlag::new());
        assert!(runner.calls.iter().all(|&(kind, _)| kind == hard()));
        assert!(summary.reports[0].complete);
        assert!(!config.checkpoint.exists());
    }

    #[test]
    fn test_malformed_checkpoint_is_fatal() {
        let dir = temp_dir("driver-malformed");
        let config = config(&dir, vec![easy()], 1);
        fs::write(&config.checkpoint, "[1, 2").unwrap();
        let err =
            BatchDriver::new(config, RecordingRunner::default(), ShutdownFlag::new()).unwrap_err();
        assert!(matches!(err, BatchError::Parse { .. }));
    }

    #[test]
    fn test_config_defaults() {
        let config = BatchConfig::new("out/puzzles.json");
        assert_eq!(config.kinds.len(), 15);
        assert_eq!(config.kinds[0].to_string(), "5x5-easy");
        assert_eq!(config.kinds[14].to_string(), "10x10-hard");
        assert_eq!(
            config.checkpoint,
            PathBuf::from("out/puzzles.json.checkpoint.json")
        );
        assert_eq!(config.seed_end(), 500_001);
        assert_eq!(config.save_cadence(easy()), 10);
        assert_eq!(
            config.save_cadence(PuzzleKind::new(10, 10, Difficulty::Easy)),
            1
        );
    }
}
