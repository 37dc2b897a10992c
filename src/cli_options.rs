/*
cli_options.rs

Copyright 2025 The Numtrail Authors

This file is part of Numtrail.

Numtrail is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Numtrail is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Numtrail. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! The command line is intended for developers tuning presets and for
//! consumers that want puzzles as JSON documents.
//!
//! # Examples
//!
//! List the difficulty presets:
//!
//! ```text
//! $ numtrail --ls
//! Starter
//! Easy
//! ...
//! Master
//! ```
//!
//! Generate three Medium puzzles from a fixed seed and print statistics:
//!
//! ```text
//! $ numtrail -p medium -c 3 --seed 42 -s
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;

use crate::generator::puzzle::{GenerationError, GenerationOptions, Puzzle, PuzzleGenerator};
use crate::settings::{Difficulty, DifficultySettings};

/// Abort a batch when generation keeps failing, so that unusable custom
/// settings do not loop forever.
const MAX_BATCH_ERRORS: usize = 100;

/// Generate arithmetic path puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// List the difficulty presets
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Difficulty preset to generate puzzles for
    #[arg(value_enum, short, long, group = "generate")]
    preset: Option<Difficulty>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Seed for reproducible generation
    #[arg(long, requires = "generate")]
    seed: Option<u64>,

    /// Print the puzzles as JSON documents instead of text boards
    #[arg(short, long, default_value_t = false, requires = "generate")]
    json: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the presets
    //
    if args.ls {
        for preset in Difficulty::all() {
            println!("{preset}");
        }
        return 0;
    }

    let Some(preset) = args.preset else {
        eprintln!("Nothing to do. Use --ls to list the presets or --preset to generate.");
        return 1;
    };
    let settings: DifficultySettings = preset.settings();
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    //
    // Generate the requested number of puzzles
    //
    let mut generator: PuzzleGenerator = PuzzleGenerator::new(GenerationOptions::default());
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;
    let mut iterations: usize = 0;
    let mut i: usize = 0;
    while i < args.count {
        debug!("Puzzle {i}");
        match generator.generate(&settings, &mut rng) {
            Ok(puzzle) => {
                total += generator.duration;
                if generator.duration > max {
                    max = generator.duration;
                }
                iterations += generator.iteration;

                if args.json {
                    match serde_json::to_string_pretty(&puzzle) {
                        Ok(document) => println!("{document}"),
                        Err(e) => {
                            eprintln!("Cannot serialize the puzzle: {e}");
                            return 1;
                        }
                    }
                } else {
                    print_board(&puzzle);
                }
                i += 1;
            }
            Err(e @ GenerationError::InvalidSettings(_)) => {
                eprintln!("Error: {e}");
                return 1;
            }
            Err(e) => {
                errors += 1;
                debug!("ERROR generating puzzle: {e}");
                if errors >= MAX_BATCH_ERRORS {
                    eprintln!("Error: {e}");
                    return 1;
                }
            }
        }
    }

    // Print some stats
    if args.summary {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}
            errors = {}",
            total,
            total / args.count.max(1) as f32,
            max,
            iterations / args.count.max(1),
            errors
        );
    }
    0
}

/// Print the puzzle as a text board, with the solution below it.
fn print_board(puzzle: &Puzzle) {
    println!("Puzzle {} ({})", puzzle.id, puzzle.difficulty_level);
    for line in &puzzle.grid {
        let mut row: String = String::new();
        for cell in line {
            let text: String = if cell.is_start {
                format!("[{}]", cell.expression)
            } else if cell.is_finish {
                String::from("FINISH")
            } else {
                cell.expression.clone()
            };
            row.push_str(&format!("{text:>12}"));
        }
        println!("{row}");
    }
    let route: Vec<String> = puzzle.solution.iter().map(|c| c.to_string()).collect();
    println!("Solution: {}", route.join(" -> "));
    println!();
}
