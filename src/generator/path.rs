/*
path.rs

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

//! Solution path through the puzzle grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::coord::Coordinate;

/// Ordered route of cells from the START cell to the FINISH cell.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SolutionPath {
    /// Path as an ordered list of cells.
    path: Vec<Coordinate>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`SolutionPath::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Coordinate>,
}

impl PartialEq for SolutionPath {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl SolutionPath {
    /// Create a [`SolutionPath`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Create a [`SolutionPath`] object from a list of cells.
    pub fn from_vec(cells: &[Coordinate]) -> Self {
        Self {
            path: cells.to_vec(),
            visited: cells.iter().copied().collect(),
        }
    }

    /// Remove all the cells from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.visited.clear();
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: Coordinate) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path.
    pub fn pop(&mut self) {
        if let Some(c) = self.path.pop() {
            self.visited.remove(&c);
        }
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: &Coordinate) -> bool {
        self.visited.contains(cell)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<Coordinate> {
        &self.path
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Coordinate> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Coordinate> {
        self.path.last().copied()
    }

    /// Number of direction changes along the path.
    ///
    /// A straight line has zero direction changes. The counter is used to
    /// reject boring paths during generation.
    pub fn direction_changes(&self) -> usize {
        let mut changes: usize = 0;
        let mut previous: Option<(i64, i64)> = None;

        for pair in self.path.windows(2) {
            let delta: (i64, i64) = (
                pair[1].row as i64 - pair[0].row as i64,
                pair[1].col as i64 - pair[0].col as i64,
            );
            if let Some(p) = previous
                && p != delta
            {
                changes += 1;
            }
            previous = Some(delta);
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_contains() {
        let mut path: SolutionPath = SolutionPath::new(4);

        path.push(Coordinate::new(0, 0));
        path.push(Coordinate::new(0, 1));
        assert_eq!(path.len(), 2);
        assert!(path.contains(&Coordinate::new(0, 1)));

        path.pop();
        assert_eq!(path.len(), 1);
        assert!(!path.contains(&Coordinate::new(0, 1)));
        assert!(path.contains(&Coordinate::new(0, 0)));
    }

    #[test]
    fn test_first_last() {
        let path: SolutionPath = SolutionPath::from_vec(&[
            Coordinate::new(0, 0),
            Coordinate::new(1, 1),
            Coordinate::new(2, 2),
        ]);

        assert_eq!(path.get_first(), Some(Coordinate::new(0, 0)));
        assert_eq!(path.get_last(), Some(Coordinate::new(2, 2)));
        assert_eq!(SolutionPath::new(0).get_first(), None);
    }

    #[test]
    fn test_direction_changes_straight_line() {
        let path: SolutionPath = SolutionPath::from_vec(&[
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(0, 2),
            Coordinate::new(0, 3),
        ]);

        assert_eq!(path.direction_changes(), 0);
    }

    #[test]
    fn test_direction_changes_zigzag() {
        let path: SolutionPath = SolutionPath::from_vec(&[
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(1, 1),
            Coordinate::new(1, 2),
            Coordinate::new(2, 3),
        ]);

        assert_eq!(path.direction_changes(), 3);
    }

    #[test]
    fn test_eq_ignores_visited_bookkeeping() {
        let a: SolutionPath =
            SolutionPath::from_vec(&[Coordinate::new(0, 0), Coordinate::new(1, 0)]);
        let mut b: SolutionPath = SolutionPath::new(8);
        b.push(Coordinate::new(0, 0));
        b.push(Coordinate::new(1, 0));

        assert_eq!(a, b);
    }
}
