/*
cells.rs

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

//! Puzzle cells and answer assignment.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::connectors::Connector;
use super::coord::Coordinate;
use super::path::SolutionPath;

/// A cell of the puzzle grid.
///
/// The FINISH cell has no answer and an empty expression. Every other cell
/// has an answer equal to the value of exactly one connector touching it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Cell {
    pub row: usize,
    pub col: usize,

    /// Display text of the arithmetic expression, empty for FINISH.
    pub expression: String,

    /// Target answer. The player leaves the cell through the connector that
    /// carries this value.
    pub answer: Option<i32>,

    pub is_start: bool,
    pub is_finish: bool,
}

impl Cell {
    /// Coordinate of the cell.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// Cell grid with the set of cells that should prioritize a division
/// expression.
#[derive(Debug, Clone)]
pub struct CellGrid {
    /// Cells in row-major order, expressions not yet synthesized.
    pub cells: Vec<Vec<Cell>>,

    /// Cells whose answer sits on a reserved division connector.
    pub division_cells: HashSet<Coordinate>,
}

/// Set every cell's answer.
///
/// For each consecutive pair on the solution path, the earlier cell's answer
/// becomes the value of the connector joining the pair; when that connector
/// is one of the reserved division connectors, the cell is flagged. Every
/// off-path cell gets the value of a random touching connector. FINISH keeps
/// a [`None`] answer.
pub fn assign_answers(
    rows: usize,
    cols: usize,
    path: &SolutionPath,
    connectors: &[Connector],
    division_connectors: &HashSet<usize>,
    rng: &mut impl Rng,
) -> CellGrid {
    let finish: Coordinate = Coordinate::new(rows - 1, cols - 1);
    let mut cells: Vec<Vec<Cell>> = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| Cell {
                    row,
                    col,
                    expression: String::new(),
                    answer: None,
                    is_start: row == 0 && col == 0,
                    is_finish: row == rows - 1 && col == cols - 1,
                })
                .collect()
        })
        .collect();
    let mut division_cells: HashSet<Coordinate> = HashSet::new();

    // Path cells: the answer is the value of the exit connector.
    for pair in path.get().windows(2) {
        if let Some(index) = connectors.iter().position(|c| c.joins(&pair[0], &pair[1])) {
            cells[pair[0].row][pair[0].col].answer = Some(connectors[index].value);
            if division_connectors.contains(&index) {
                division_cells.insert(pair[0]);
            }
        }
    }

    // Off-path cells: the answer is the value of a random touching connector.
    for row in 0..rows {
        for col in 0..cols {
            let cell: Coordinate = Coordinate::new(row, col);
            if cell == finish || path.contains(&cell) {
                continue;
            }
            let touching: Vec<i32> = connectors
                .iter()
                .filter(|c| c.touches(&cell))
                .map(|c| c.value)
                .collect();
            cells[row][col].answer = touching.choose(rng).copied();
        }
    }

    debug!(
        "Answers assigned: {} path cells, {} division cells",
        path.len().saturating_sub(1),
        division_cells.len()
    );
    CellGrid {
        cells,
        division_cells,
    }
}
