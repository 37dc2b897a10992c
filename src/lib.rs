/*
lib.rs

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

//! Numtrail generates and verifies arithmetic path puzzles.
//!
//! A puzzle is a grid where every cell carries an arithmetic expression and
//! every link between adjacent cells (a connector) carries an integer value.
//! The player walks from the START cell to the FINISH cell by solving each
//! cell's expression and leaving through the connector that carries the
//! answer. The generator guarantees that at least one such route exists and
//! that every cell's answer selects exactly one of its connectors.
//!
//! The main entry points are [`generate_puzzle`] and
//! [`generate_puzzle_seeded`]; [`Difficulty`] provides ten built-in presets
//! and [`DifficultySettings::custom`] a configurable starting point.

pub mod cli_options;
pub mod generator;
pub mod settings;

pub use generator::puzzle::{
    GenerationError, GenerationOptions, Puzzle, PuzzleGenerator, generate_puzzle,
    generate_puzzle_seeded,
};
pub use generator::validator::{ValidationResult, validate};
pub use settings::{Difficulty, DifficultySettings};
