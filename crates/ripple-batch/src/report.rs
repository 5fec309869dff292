//! Per-configuration statistics and the end-of-run summary.

use std::{collections::BTreeMap, fmt, time::Duration};

use ripple_generator::{PuzzleKind, RejectReason};

/// Outcome of one configuration in a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigReport {
    /// The configuration.
    pub kind: PuzzleKind,
    /// Accepted puzzles, including those loaded from an earlier run.
    pub accepted: usize,
    /// Target number of puzzles.
    pub target: usize,
    /// Attempts run in this session.
    pub seeds_tried: u64,
    /// Seeds passed over in this session because the dataset already holds them.
    pub seeds_skipped: u64,
    /// Puzzles accepted in this session.
    pub new_puzzles: usize,
    /// Rejected attempts in this session, by reason.
    pub rejections: BTreeMap<RejectReason, u64>,
    /// Time spent in this session.
    pub elapsed: Duration,
    /// The target was reached or the seed range ran out.
    pub complete: bool,
}

impl ConfigReport {
    /// An empty report for `kind`.
    #[must_use]
    pub fn new(kind: PuzzleKind, target: usize) -> Self {
        Self {
            kind,
            accepted: 0,
            target,
            seeds_tried: 0,
            seeds_skipped: 0,
            new_puzzles: 0,
            rejections: BTreeMap::new(),
            elapsed: Duration::ZERO,
            complete: false,
        }
    }

    /// Counts a rejected attempt.
    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejections.entry(reason).or_default() += 1;
    }

    /// Seeds this session has moved past, tried or skipped.
    #[must_use]
    pub fn seeds_visited(&self) -> u64 {
        self.seeds_tried + self.seeds_skipped
    }

    /// Puzzles still missing to reach the target.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.accepted)
    }

    /// Fraction of this session's attempts that were accepted, in percent.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.seeds_tried == 0 {
            return 0.0;
        }
        self.new_puzzles as f64 / self.seeds_tried as f64 * 100.0
    }

    /// Puzzles accepted per second in this session.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.new_puzzles as f64 / secs
    }

    /// The live progress line, reporting `seed` as the current seed.
    #[must_use]
    pub fn progress_line(&self, seed: u64) -> String {
        format!(
            "{}: found {}/{} | seed {seed} | {:.1}s | {:.2} puzzles/s | success {:.1}%",
            self.kind,
            self.accepted,
            self.target,
            self.elapsed.as_secs_f64(),
            self.throughput(),
            self.success_rate(),
        )
    }
}

impl fmt::Display for ConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} accepted, {} seeds in {:.1}s",
            self.kind,
            self.accepted,
            self.target,
            self.seeds_tried,
            self.elapsed.as_secs_f64()
        )?;
        if self.seeds_skipped > 0 {
            write!(f, ", {} already known", self.seeds_skipped)?;
        }
        if !self.rejections.is_empty() {
            let rejections: Vec<String> = self
                .rejections
                .iter()
                .map(|(reason, count)| format!("{reason}={count}"))
                .collect();
            write!(f, " [{}]", rejections.join(", "))?;
        }
        if !self.complete {
            write!(f, " (incomplete)")?;
        } else if self.shortfall() > 0 {
            write!(f, " (short by {})", self.shortfall())?;
        }
        Ok(())
    }
}

/// Result of a whole batch run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchSummary {
    /// Reports of the configurations visited, in order.
    pub reports: Vec<ConfigReport>,
    /// The run stopped early on a shutdown request.
    pub interrupted: bool,
}

impl BatchSummary {
    /// Total accepted puzzles across visited configurations.
    #[must_use]
    pub fn total_accepted(&self) -> usize {
        self.reports.iter().map(|report| report.accepted).sum()
    }

    /// Reports of configurations that finished below their target.
    pub fn shortfalls(&self) -> impl Iterator<Item = &ConfigReport> {
        self.reports
            .iter()
            .filter(|report| report.complete && report.shortfall() > 0)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        for report in &self.reports {
            writeln!(f, "  {report}")?;
        }
        write!(f, "  total: {} puzzles", self.total_accepted())?;
        if self.interrupted {
            write!(f, " (interrupted, resume from checkpoint)")?;
        }
        Ok(())
    }
}
