//! Ripple Effect batch generator.
//!
//! Generates uniquely solvable puzzles for every configured size and
//! difficulty and writes them to a JSON dataset, resuming from the checkpoint
//! of an interrupted run.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use ripple_batch::{
    BatchConfig, BatchDriver, BatchError, BatchSummary, DEFAULT_SIZES, ShutdownFlag,
};
use ripple_generator::{Difficulty, GeneratorConfig, PuzzleGenerator, parse_size};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzles to generate per configuration.
    #[arg(value_name = "TARGET_COUNT", default_value_t = 1000)]
    target_count: usize,

    /// First seed of every configuration.
    #[arg(value_name = "START_SEED", default_value_t = 1)]
    start_seed: u64,

    /// Seeds to try per configuration before giving up on its target.
    #[arg(value_name = "MAX_SEED_PER_CONFIG", default_value_t = 500_000)]
    max_seed_per_config: u64,

    /// Dataset file.
    #[arg(long, value_name = "PATH", default_value = "ripple_puzzles.json")]
    output: PathBuf,

    /// Checkpoint file [default: <OUTPUT>.checkpoint.json].
    #[arg(long, value_name = "PATH")]
    checkpoint: Option<PathBuf>,

    /// Grid size to generate, as <ROWS>x<COLS>. Repeatable [default: 5x5, 6x6, 7x7, 8x8, 10x10].
    #[arg(long = "size", value_name = "SIZE", value_parser = parse_size)]
    sizes: Vec<(usize, usize)>,

    /// Difficulty to generate. Repeatable [default: all].
    #[arg(long = "difficulty", value_name = "DIFFICULTY")]
    difficulties: Vec<Difficulty>,

    /// Bound every search by this many nodes instead of wall-clock time.
    #[arg(long, value_name = "NODES")]
    node_limit: Option<u64>,
}

impl Args {
    fn batch_config(&self) -> BatchConfig {
        let sizes = if self.sizes.is_empty() {
            DEFAULT_SIZES.as_slice()
        } else {
            self.sizes.as_slice()
        };
        let difficulties = if self.difficulties.is_empty() {
            Difficulty::ALL.as_slice()
        } else {
            self.difficulties.as_slice()
        };
        let mut config = BatchConfig {
            kinds: BatchConfig::sweep(sizes, difficulties),
            target_count: self.target_count,
            start_seed: self.start_seed,
            seeds_per_config: self.max_seed_per_config,
            ..BatchConfig::new(&self.output)
        };
        if let Some(checkpoint) = &self.checkpoint {
            config.checkpoint.clone_from(checkpoint);
        }
        config
    }

    fn generator_config(&self) -> GeneratorConfig {
        match self.node_limit {
            Some(nodes) => GeneratorConfig::deterministic(nodes),
            None => GeneratorConfig::default(),
        }
    }
}

fn run(args: &Args) -> Result<BatchSummary, BatchError> {
    let shutdown = ShutdownFlag::new();
    let handle = shutdown.clone();
    ctrlc::set_handler(move || {
        log::warn!("shutdown requested, finishing the current attempt");
        handle.request();
    })
    .map_err(BatchError::Signal)?;

    let config = args.batch_config();
    log::info!(
        "generating {} puzzles for {} configurations into {}",
        config.target_count,
        config.kinds.len(),
        config.output.display()
    );
    let generator = PuzzleGenerator::new(args.generator_config());
    BatchDriver::new(config, generator, shutdown)?.run()
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(summary) => {
            println!("{summary}");
            if summary.interrupted {
                ExitCode::from(130)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
