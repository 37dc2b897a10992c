/*
coord.rs

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

//! Grid coordinates and diagonal directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in the puzzle grid.
///
/// The START cell is at `(0, 0)` and the FINISH cell is at
/// `(rows - 1, cols - 1)`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Coordinate {
    /// Create a [`Coordinate`] object.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Stable string key, used for set and map membership.
    pub fn key(&self) -> String {
        format!("{},{}", self.row, self.col)
    }

    /// Whether the coordinate is inside a grid of the given dimensions.
    pub fn in_bounds(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// Whether the two cells are adjacent with 8-connectivity.
    ///
    /// A cell is not adjacent to itself.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        let dr: usize = self.row.abs_diff(other.row);
        let dc: usize = self.col.abs_diff(other.col);

        dr <= 1 && dc <= 1 && (dr != 0 || dc != 0)
    }

    /// Whether the step from this cell to `other` is a diagonal move.
    pub fn is_diagonal_to(&self, other: &Coordinate) -> bool {
        self.row.abs_diff(other.row) == 1 && self.col.abs_diff(other.col) == 1
    }

    /// Manhattan distance between the two cells.
    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// All the 8-connected neighbors of the cell that are inside the grid.
    pub fn neighbors(&self, rows: usize, cols: usize) -> Vec<Coordinate> {
        let mut result: Vec<Coordinate> = Vec::with_capacity(8);

        for dr in -1i64..=1 {
            for dc in -1i64..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r: i64 = self.row as i64 + dr;
                let c: i64 = self.col as i64 + dc;
                if r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols {
                    result.push(Coordinate::new(r as usize, c as usize));
                }
            }
        }
        result
    }
}

/// Orientation of the wired diagonal inside a 2x2 block of cells.
///
/// Each block carries exactly one of the two possible diagonals, which
/// guarantees that diagonal connectors never cross each other.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DiagonalDirection {
    /// The diagonal goes from the top-left cell to the bottom-right cell.
    DownRight,

    /// The diagonal goes from the top-right cell to the bottom-left cell.
    DownLeft,
}

impl DiagonalDirection {
    /// Return the other diagonal orientation.
    pub fn opposite(&self) -> Self {
        match self {
            DiagonalDirection::DownRight => DiagonalDirection::DownLeft,
            DiagonalDirection::DownLeft => DiagonalDirection::DownRight,
        }
    }
}

/// Top-left corner of the 2x2 block that contains the diagonal step between
/// the two given cells.
///
/// The cells must be diagonal neighbors; every diagonal step belongs to
/// exactly one block.
pub fn block_of_step(a: &Coordinate, b: &Coordinate) -> Coordinate {
    Coordinate::new(a.row.min(b.row), a.col.min(b.col))
}

/// Diagonal orientation of the step between the two given diagonal neighbors.
pub fn direction_of_step(a: &Coordinate, b: &Coordinate) -> DiagonalDirection {
    // Down-right when the rows and columns move the same way.
    if (a.row < b.row) == (a.col < b.col) {
        DiagonalDirection::DownRight
    } else {
        DiagonalDirection::DownLeft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let c: Coordinate = Coordinate::new(1, 1);

        assert!(c.is_adjacent(&Coordinate::new(0, 0)));
        assert!(c.is_adjacent(&Coordinate::new(1, 2)));
        assert!(c.is_adjacent(&Coordinate::new(2, 0)));
        assert!(!c.is_adjacent(&Coordinate::new(1, 1)));
        assert!(!c.is_adjacent(&Coordinate::new(3, 1)));
        assert!(!c.is_adjacent(&Coordinate::new(1, 3)));
    }

    #[test]
    fn test_diagonal_step() {
        let a: Coordinate = Coordinate::new(2, 2);

        assert!(a.is_diagonal_to(&Coordinate::new(1, 1)));
        assert!(a.is_diagonal_to(&Coordinate::new(3, 1)));
        assert!(!a.is_diagonal_to(&Coordinate::new(2, 3)));
        assert!(!a.is_diagonal_to(&Coordinate::new(1, 2)));
    }

    #[test]
    fn test_neighbors_at_corner() {
        let n: Vec<Coordinate> = Coordinate::new(0, 0).neighbors(3, 4);

        assert_eq!(n.len(), 3);
        assert!(n.contains(&Coordinate::new(0, 1)));
        assert!(n.contains(&Coordinate::new(1, 0)));
        assert!(n.contains(&Coordinate::new(1, 1)));
    }

    #[test]
    fn test_neighbors_interior() {
        assert_eq!(Coordinate::new(1, 1).neighbors(3, 4).len(), 8);
    }

    #[test]
    fn test_manhattan_distance() {
        let a: Coordinate = Coordinate::new(0, 0);
        let b: Coordinate = Coordinate::new(2, 3);

        assert_eq!(a.manhattan_distance(&b), 5);
        assert_eq!(b.manhattan_distance(&a), 5);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_block_and_direction_of_step() {
        let a: Coordinate = Coordinate::new(1, 2);
        let b: Coordinate = Coordinate::new(2, 1);

        assert_eq!(block_of_step(&a, &b), Coordinate::new(1, 1));
        assert_eq!(direction_of_step(&a, &b), DiagonalDirection::DownLeft);
        assert_eq!(direction_of_step(&b, &a), DiagonalDirection::DownLeft);

        let c: Coordinate = Coordinate::new(0, 0);
        let d: Coordinate = Coordinate::new(1, 1);
        assert_eq!(block_of_step(&c, &d), Coordinate::new(0, 0));
        assert_eq!(direction_of_step(&c, &d), DiagonalDirection::DownRight);
        assert_eq!(direction_of_step(&d, &c), DiagonalDirection::DownRight);
    }

    #[test]
    fn test_key() {
        assert_eq!(Coordinate::new(4, 7).key(), "4,7");
    }
}
