//! Example demonstrating single Ripple Effect puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` with the default configuration
//! - Generate the puzzle determined by a size, difficulty and seed
//! - Display the clues, regions, solution and clue count
//! - Sample a range of seeds and keep the puzzle with the fewest clues
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle -- --size 6x6 --difficulty hard --seed 42
//! ```
//!
//! Try `--sample` seeds starting at `--seed` and print the puzzle with the
//! fewest clues:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --size 7x7 --sample 50
//! ```

use std::process::ExitCode;

use clap::Parser;
use ripple_generator::{
    Difficulty, GeneratedPuzzle, PuzzleGenerator, PuzzleKind, RejectReason, parse_size,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid size as <ROWS>x<COLS>.
    #[arg(long, value_name = "SIZE", default_value = "6x6", value_parser = parse_size)]
    size: (usize, usize),

    /// Difficulty tier.
    #[arg(long, value_name = "DIFFICULTY", default_value = "medium")]
    difficulty: Difficulty,

    /// Seed of the (first) attempt.
    #[arg(long, value_name = "SEED", default_value_t = 1)]
    seed: u64,

    /// Number of consecutive seeds to try; the puzzle with the fewest clues wins.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    sample: u64,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let (rows, cols) = args.size;
    let kind = PuzzleKind::new(rows, cols, args.difficulty);
    let generator = PuzzleGenerator::default();

    if args.sample == 0 {
        eprintln!("--sample must be at least 1.");
        return ExitCode::FAILURE;
    }

    let mut best: Option<GeneratedPuzzle> = None;
    let mut rejected: Vec<(u64, RejectReason)> = Vec::new();
    for seed in args.seed..args.seed.saturating_add(args.sample) {
        match generator.generate_with_seed(kind, seed) {
            Ok(puzzle) => {
                if best
                    .as_ref()
                    .is_none_or(|b| puzzle.clue_count() < b.clue_count())
                {
                    best = Some(puzzle);
                }
            }
            Err(reason) => rejected.push((seed, reason)),
        }
    }

    if !rejected.is_empty() {
        println!("Rejected:");
        for (seed, reason) in &rejected {
            println!("  seed {seed}: {reason}");
        }
        println!();
    }

    let Some(puzzle) = best else {
        eprintln!("No puzzle accepted for {kind}.");
        return ExitCode::FAILURE;
    };
    print_puzzle(&puzzle);
    ExitCode::SUCCESS
}

fn print_puzzle(puzzle: &GeneratedPuzzle) {
    println!("Kind:");
    println!("  {}", puzzle.kind);
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();

    println!("Clues:");
    print_indented(&puzzle.clues.to_string());
    println!();
    println!("Regions:");
    for row in puzzle.regions.to_rows() {
        let line: Vec<String> = row.iter().map(|id| format!("{id:>3}")).collect();
        println!("  {}", line.join(""));
    }
    println!();
    println!("Solution:");
    print_indented(&puzzle.solution.to_string());
    println!();

    println!("Stats:");
    println!(
        "  clues: {} (target {})",
        puzzle.clue_count(),
        puzzle.kind.target_clues()
    );
    println!("  regions: {}", puzzle.regions.len());
}

fn print_indented(text: &str) {
    for line in text.lines() {
        println!("  {line}");
    }
}
