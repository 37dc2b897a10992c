/*
puzzle.rs

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

//! Puzzle object and generation orchestration.
//!
//! [`PuzzleGenerator`] drives the whole pipeline: path search, diagonal grid,
//! connector graph, value assignment, answer assignment, expression
//! synthesis, and validation. Each attempt is independent; on failure at any
//! stage, the attempt is discarded and a fresh random path is sampled.

use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::cells::{Cell, CellGrid, assign_answers};
use super::connectors::{Connector, build_connector_graph};
use super::coord::{Coordinate, DiagonalDirection};
use super::diagonals::build_diagonal_grid;
use super::expressions::{Expression, ExpressionSynthesizer};
use super::random_path::{GeneratedPath, PathGenerator};
use super::validator::{ValidationResult, validate};
use super::values::{ValueAssigner, ValuedConnectors};
use crate::settings::DifficultySettings;

/// Number of random walks the path generator may try per attempt.
const PATH_ATTEMPTS: usize = 25;

/// A complete, validated puzzle.
///
/// The puzzle owns its grid and connector list outright and is immutable once
/// validated. Gameplay overlays (visited cells, traversed connectors, lives,
/// timer) live in the gameplay layer, which treats this object as read-only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Puzzle {
    pub id: String,

    /// Name of the difficulty preset the puzzle was generated from.
    pub difficulty_level: String,

    pub rows: usize,
    pub cols: usize,

    /// Cells in row-major order.
    pub grid: Vec<Vec<Cell>>,

    pub connectors: Vec<Connector>,

    /// Route from START `(0, 0)` to FINISH `(rows - 1, cols - 1)`.
    pub solution: Vec<Coordinate>,
}

/// Generation options.
#[derive(Debug, Copy, Clone)]
pub struct GenerationOptions {
    /// Number of full pipeline attempts before giving up.
    pub max_attempts: usize,

    /// Whether to run the validator on each assembled puzzle.
    pub validate: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            validate: true,
        }
    }
}

/// Per-stage failure counters, aggregated across attempts.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FailureCounters {
    /// Attempts where no acceptable path was found.
    pub path_failures: usize,

    /// Attempts where a connector ran out of legal values.
    pub connector_failures: usize,

    /// Attempts where the assembled puzzle failed validation.
    pub validation_failures: usize,
}

impl fmt::Display for FailureCounters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} path, {} connector, {} validation",
            self.path_failures, self.connector_failures, self.validation_failures
        )
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerationError {
    /// The settings cannot produce any puzzle.
    InvalidSettings(String),

    /// All the attempts were used without producing a valid puzzle.
    Exhausted {
        attempts: usize,
        counters: FailureCounters,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::InvalidSettings(msg) => {
                write!(f, "Invalid difficulty settings: {msg}")
            }
            GenerationError::Exhausted { attempts, counters } => write!(
                f,
                "No valid puzzle after {attempts} attempts (failures: {counters}); \
                 try different settings"
            ),
        }
    }
}

impl Error for GenerationError {}

/// [`PuzzleGenerator`] object.
pub struct PuzzleGenerator {
    options: GenerationOptions,

    /// Per-stage failure counters for the last generation.
    pub counters: FailureCounters,

    /// Number of attempts it took to generate the last puzzle.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last puzzle.
    pub duration: f32,
}

impl PuzzleGenerator {
    /// Create the object.
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            options,
            counters: FailureCounters::default(),
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Generate a puzzle for the given settings.
    ///
    /// # Errors
    ///
    /// The method returns an error when the settings are unusable, or when
    /// all the attempts were used without success. The exhaustion error
    /// carries the per-stage failure counts so that the caller can suggest
    /// different settings instead of retrying blindly.
    pub fn generate(
        &mut self,
        settings: &DifficultySettings,
        rng: &mut impl Rng,
    ) -> Result<Puzzle, GenerationError> {
        Self::check_settings(settings)?;

        self.counters = FailureCounters::default();
        self.iteration = 0;
        let start: Instant = Instant::now();
        let (min_length, max_length) = settings.path_length_bounds();
        debug!(
            "Generating a {}x{} puzzle, path length {min_length}-{max_length}",
            settings.rows, settings.cols
        );

        while self.iteration < self.options.max_attempts {
            self.iteration += 1;
            debug!("== Attempt {}", self.iteration);

            if let Ok(puzzle) = self.attempt(settings, min_length, max_length, rng) {
                self.duration = start.elapsed().as_secs_f32();
                debug!(
                    "Puzzle {} generated in {} attempts ({}s)",
                    puzzle.id, self.iteration, self.duration
                );
                return Ok(puzzle);
            }
        }
        self.duration = start.elapsed().as_secs_f32();
        Err(GenerationError::Exhausted {
            attempts: self.iteration,
            counters: self.counters,
        })
    }

    /// Run the pipeline once. An `Err(())` return means that the attempt was
    /// discarded; the matching failure counter has already been incremented.
    fn attempt(
        &mut self,
        settings: &DifficultySettings,
        min_length: usize,
        max_length: usize,
        rng: &mut impl Rng,
    ) -> Result<Puzzle, ()> {
        let rows: usize = settings.rows;
        let cols: usize = settings.cols;

        // Solution path with its diagonal commitments.
        let mut path_generator: PathGenerator =
            PathGenerator::new(rows, cols, min_length, max_length, PATH_ATTEMPTS);
        let generated: GeneratedPath = match path_generator.generate(rng) {
            Ok(g) => g,
            Err(_) => {
                self.counters.path_failures += 1;
                return Err(());
            }
        };

        // Diagonal orientations and the full connector graph.
        let diagonal_grid: Vec<Vec<DiagonalDirection>> =
            build_diagonal_grid(rows, cols, &generated.commitments, rng);
        let connectors: Vec<Connector> = build_connector_graph(rows, cols, &diagonal_grid);

        // Connector values, with per-cell uniqueness.
        let assigner: ValueAssigner = ValueAssigner::new(
            settings.connector_min,
            settings.connector_max,
            settings.division,
            settings.mult_div_range,
            &generated.path,
        );
        let valued: ValuedConnectors = match assigner.assign(connectors, rng) {
            Ok(v) => v,
            Err(_) => {
                self.counters.connector_failures += 1;
                return Err(());
            }
        };

        // Cell answers, then one expression per non-FINISH cell.
        let mut grid: CellGrid = assign_answers(
            rows,
            cols,
            &generated.path,
            &valued.connectors,
            &valued.division_connectors,
            rng,
        );
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(settings);
        for line in grid.cells.iter_mut() {
            for cell in line.iter_mut() {
                if let Some(answer) = cell.answer {
                    let prioritize: bool = grid.division_cells.contains(&cell.coordinate());
                    let expression: Expression = synthesizer.synthesize(answer, prioritize, rng);
                    cell.expression = expression.text;
                }
            }
        }

        let puzzle: Puzzle = Puzzle {
            id: format!(
                "{}-{:04x}",
                Utc::now().format("%Y%m%d%H%M%S"),
                rng.random_range(0..0x10000)
            ),
            difficulty_level: settings.name.clone(),
            rows,
            cols,
            grid: grid.cells,
            connectors: valued.connectors,
            solution: generated.path.get().clone(),
        };

        if self.options.validate {
            let result: ValidationResult = validate(&puzzle);
            if !result.valid {
                // Should never trigger when the pipeline stages are correct;
                // the attempt is retried anyway to stay resilient on extreme
                // settings.
                debug!("Validation failed: {:?}", result.errors);
                self.counters.validation_failures += 1;
                return Err(());
            }
        }
        Ok(puzzle)
    }

    fn check_settings(settings: &DifficultySettings) -> Result<(), GenerationError> {
        if !settings.any_operation_enabled() {
            return Err(GenerationError::InvalidSettings(String::from(
                "at least one operation must be enabled",
            )));
        }
        if settings.rows < 2 || settings.cols < 2 {
            return Err(GenerationError::InvalidSettings(format!(
                "grid too small: {}x{}",
                settings.rows, settings.cols
            )));
        }
        if settings.connector_min >= settings.connector_max {
            return Err(GenerationError::InvalidSettings(format!(
                "empty connector value range: [{}, {}]",
                settings.connector_min, settings.connector_max
            )));
        }
        Ok(())
    }
}

/// Generate a puzzle with OS entropy.
///
/// This is the primary entry point for collaborators. For reproducible
/// puzzles, use [`generate_puzzle_seeded`].
///
/// # Errors
///
/// See [`PuzzleGenerator::generate`].
pub fn generate_puzzle(
    settings: &DifficultySettings,
    options: GenerationOptions,
) -> Result<Puzzle, GenerationError> {
    let mut rng: StdRng = StdRng::from_os_rng();
    PuzzleGenerator::new(options).generate(settings, &mut rng)
}

/// Generate a puzzle from a seed. Identical seeds and settings reproduce
/// identical puzzles, except for the timestamp part of the puzzle id.
///
/// # Errors
///
/// See [`PuzzleGenerator::generate`].
pub fn generate_puzzle_seeded(
    settings: &DifficultySettings,
    options: GenerationOptions,
    seed: u64,
) -> Result<Puzzle, GenerationError> {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    PuzzleGenerator::new(options).generate(settings, &mut rng)
}
