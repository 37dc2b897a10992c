/*
validator.rs

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

//! Check every invariant of an assembled puzzle from scratch.
//!
//! The validator never trusts prior computation: it re-derives each property
//! from the puzzle object alone. All five checks run even after an early
//! failure, so the report is always complete.

use serde::Serialize;
use std::collections::HashSet;

use super::coord::Coordinate;
use super::expressions::evaluate;
use super::puzzle::Puzzle;

/// Validation report. A pure value, never mutated in place by callers.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn error(&mut self, message: String) {
        self.valid = false;
        self.errors.push(message);
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Validate the puzzle against all its structural and arithmetic invariants.
pub fn validate(puzzle: &Puzzle) -> ValidationResult {
    let mut result: ValidationResult = ValidationResult {
        valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    check_path(puzzle, &mut result);
    check_connector_uniqueness(puzzle, &mut result);
    check_answers(puzzle, &mut result);
    check_path_connectors(puzzle, &mut result);
    check_expressions(puzzle, &mut result);
    result
}

/// The path starts at START, ends at FINISH, stays in bounds, has no
/// duplicate cells, and each consecutive pair is 8-adjacent.
fn check_path(puzzle: &Puzzle, result: &mut ValidationResult) {
    let solution: &Vec<Coordinate> = &puzzle.solution;

    if solution.is_empty() {
        result.error(String::from("the solution path is empty"));
        return;
    }
    if solution[0] != Coordinate::new(0, 0) {
        result.error(format!("the path starts at {} instead of (0, 0)", solution[0]));
    }
    let finish: Coordinate = Coordinate::new(puzzle.rows - 1, puzzle.cols - 1);
    if *solution.last().unwrap_or(&finish) != finish {
        result.error(format!("the path does not end at FINISH {finish}"));
    }

    let mut seen: HashSet<Coordinate> = HashSet::with_capacity(solution.len());
    for cell in solution {
        if !cell.in_bounds(puzzle.rows, puzzle.cols) {
            result.error(format!("path cell {cell} is out of bounds"));
        }
        if !seen.insert(*cell) {
            result.error(format!("path cell {cell} is visited twice"));
        }
    }
    for pair in solution.windows(2) {
        if !pair[0].is_adjacent(&pair[1]) {
            result.error(format!(
                "path cells {} and {} are not adjacent",
                pair[0], pair[1]
            ));
        }
    }
}

/// The values on the connectors touching each cell are pairwise distinct.
fn check_connector_uniqueness(puzzle: &Puzzle, result: &mut ValidationResult) {
    for row in 0..puzzle.rows {
        for col in 0..puzzle.cols {
            let cell: Coordinate = Coordinate::new(row, col);
            let mut seen: HashSet<i32> = HashSet::new();

            for connector in puzzle.connectors.iter().filter(|c| c.touches(&cell)) {
                if !seen.insert(connector.value) {
                    result.error(format!(
                        "duplicate connector value {} at cell {cell}",
                        connector.value
                    ));
                }
            }
        }
    }
}

/// Every non-FINISH cell's answer matches exactly one touching connector;
/// FINISH has no answer.
fn check_answers(puzzle: &Puzzle, result: &mut ValidationResult) {
    let finish: Coordinate = Coordinate::new(puzzle.rows - 1, puzzle.cols - 1);

    for line in &puzzle.grid {
        for cell in line {
            let coordinate: Coordinate = cell.coordinate();
            if cell.is_finish != (coordinate == finish) {
                result.warning(format!("inconsistent FINISH flag at cell {coordinate}"));
            }
            if coordinate == finish {
                if cell.answer.is_some() {
                    result.error(format!("FINISH cell {coordinate} has an answer"));
                }
                continue;
            }
            match cell.answer {
                None => result.error(format!("cell {coordinate} has no answer")),
                Some(answer) => {
                    let matches: usize = puzzle
                        .connectors
                        .iter()
                        .filter(|c| c.touches(&coordinate) && c.value == answer)
                        .count();
                    if matches != 1 {
                        result.error(format!(
                            "answer {answer} of cell {coordinate} matches {matches} \
                             touching connectors instead of 1"
                        ));
                    }
                }
            }
        }
    }
}

/// The connector between each consecutive path pair exists and carries the
/// earlier cell's answer.
fn check_path_connectors(puzzle: &Puzzle, result: &mut ValidationResult) {
    for pair in puzzle.solution.windows(2) {
        match puzzle.connectors.iter().find(|c| c.joins(&pair[0], &pair[1])) {
            None => result.error(format!(
                "no connector between path cells {} and {}",
                pair[0], pair[1]
            )),
            Some(connector) => {
                let answer: Option<i32> = puzzle
                    .grid
                    .get(pair[0].row)
                    .and_then(|line| line.get(pair[0].col))
                    .and_then(|cell| cell.answer);
                if answer != Some(connector.value) {
                    result.error(format!(
                        "path cell {} answer {answer:?} does not match its exit \
                         connector value {}",
                        pair[0], connector.value
                    ));
                }
            }
        }
    }
}

/// Every non-FINISH cell's expression evaluates to its answer; FINISH has an
/// empty expression.
fn check_expressions(puzzle: &Puzzle, result: &mut ValidationResult) {
    for line in &puzzle.grid {
        for cell in line {
            let coordinate: Coordinate = cell.coordinate();
            if cell.row == puzzle.rows - 1 && cell.col == puzzle.cols - 1 {
                if !cell.expression.is_empty() {
                    result.error(format!("FINISH cell {coordinate} has an expression"));
                }
                continue;
            }
            match evaluate(&cell.expression) {
                None => result.error(format!(
                    "cell {coordinate} expression {:?} does not evaluate",
                    cell.expression
                )),
                Some(value) => {
                    if cell.answer != Some(value) {
                        result.error(format!(
                            "cell {coordinate} expression {:?} evaluates to {value} \
                             instead of {:?}",
                            cell.expression, cell.answer
                        ));
                    }
                }
            }
        }
    }
}
