/*
random_path.rs

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

//! Generate a random solution path.

use log::debug;
use rand::Rng;
use std::collections::HashMap;

use super::coord::{Coordinate, DiagonalDirection, block_of_step, direction_of_step};
use super::path::SolutionPath;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum PathError {
    /// No acceptable path found within the attempt budget.
    AttemptsExhausted,
}

/// A generated path together with the diagonal orientations that the path
/// imposes on the 2x2 blocks it crosses diagonally.
#[derive(Debug, Clone)]
pub struct GeneratedPath {
    /// Route from START to FINISH.
    pub path: SolutionPath,

    /// Diagonal orientation locked by the path, keyed by the top-left cell of
    /// the 2x2 block. A block carries only one diagonal direction for the
    /// whole puzzle.
    pub commitments: HashMap<Coordinate, DiagonalDirection>,
}

/// [`PathGenerator`] object.
pub struct PathGenerator {
    /// Number of rows in the grid.
    rows: usize,

    /// Number of columns in the grid.
    cols: usize,

    /// Minimum number of cells in an acceptable path.
    min_length: usize,

    /// Maximum number of cells in an acceptable path.
    max_length: usize,

    /// Number of random walks to try before giving up.
    max_attempts: usize,

    /// Number of walks it took to generate the last path.
    pub iteration: usize,
}

impl PathGenerator {
    /// Create the object.
    pub fn new(
        rows: usize,
        cols: usize,
        min_length: usize,
        max_length: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            rows,
            cols,
            min_length,
            max_length,
            max_attempts,
            iteration: 0,
        }
    }

    /// Generate and return a random path with its diagonal commitments.
    ///
    /// The path starts at `(0, 0)`, ends at `(rows - 1, cols - 1)`, visits
    /// each cell at most once, and respects the length bounds.
    ///
    /// # Errors
    ///
    /// The method returns an error if no acceptable walk is found within the
    /// attempt budget. The caller can retry, possibly with relaxed length
    /// bounds.
    pub fn generate(&mut self, rng: &mut impl Rng) -> Result<GeneratedPath, PathError> {
        self.iteration = 0;

        while self.iteration < self.max_attempts {
            self.iteration += 1;
            if let Some(generated) = self.walk(rng) {
                debug!(
                    "Path found after {} walks: {} cells, {} direction changes",
                    self.iteration,
                    generated.path.len(),
                    generated.path.direction_changes()
                );
                return Ok(generated);
            }
        }
        debug!("No path found after {} walks", self.iteration);
        Err(PathError::AttemptsExhausted)
    }

    /// Run one random walk from START toward FINISH.
    ///
    /// Return [`None`] if the walk dead-ends, overshoots the maximum length,
    /// or produces a path that is too short or too straight.
    fn walk(&self, rng: &mut impl Rng) -> Option<GeneratedPath> {
        let finish: Coordinate = Coordinate::new(self.rows - 1, self.cols - 1);
        let mut path: SolutionPath = SolutionPath::new(self.max_length);
        let mut commitments: HashMap<Coordinate, DiagonalDirection> = HashMap::new();
        let mut current: Coordinate = Coordinate::new(0, 0);

        path.push(current);
        while current != finish {
            if path.len() >= self.max_length {
                debug!("    Walk too long ({} cells)", path.len());
                return None;
            }
            let moves: Vec<Coordinate> = self.valid_moves(&current, &path, &commitments);
            if moves.is_empty() {
                debug!("    Walk dead-ends at {current}");
                return None;
            }
            let next: Coordinate = self.pick_move(&current, &finish, &moves, path.len(), &path, rng);

            // Taking a diagonal step locks the block to that orientation for
            // the rest of the generation.
            if current.is_diagonal_to(&next) {
                commitments.insert(
                    block_of_step(&current, &next),
                    direction_of_step(&current, &next),
                );
            }
            path.push(next);
            current = next;
        }

        if path.len() < self.min_length {
            debug!("    Walk too short ({} cells)", path.len());
            return None;
        }
        let changes: usize = path.direction_changes();
        if changes < Self::required_direction_changes(path.len()) {
            debug!("    Walk too straight ({changes} direction changes)");
            return None;
        }
        Some(GeneratedPath { path, commitments })
    }

    /// Minimum number of direction changes for a path of the given length.
    fn required_direction_changes(length: usize) -> usize {
        if length < 6 {
            1
        } else if length < 8 {
            2
        } else {
            3
        }
    }

    /// Neighbors of the current cell that the walk may move to: in bounds,
    /// unvisited, and not in diagonal conflict with a committed block.
    fn valid_moves(
        &self,
        current: &Coordinate,
        path: &SolutionPath,
        commitments: &HashMap<Coordinate, DiagonalDirection>,
    ) -> Vec<Coordinate> {
        current
            .neighbors(self.rows, self.cols)
            .into_iter()
            .filter(|n| !path.contains(n))
            .filter(|n| {
                if !current.is_diagonal_to(n) {
                    return true;
                }
                let direction: DiagonalDirection = direction_of_step(current, n);
                match commitments.get(&block_of_step(current, n)) {
                    Some(d) => *d == direction,
                    None => true,
                }
            })
            .collect()
    }

    /// Select the next cell of the walk among the valid moves.
    ///
    /// Early in the walk the choice is close to uniform. As the path grows
    /// toward the maximum length, and more aggressively on large grids, the
    /// selection favors moves that reduce the Manhattan distance to FINISH.
    /// A secondary term rewards moves that keep more unvisited neighbors
    /// available, and a random jitter keeps the walk from being
    /// deterministic.
    fn pick_move(
        &self,
        current: &Coordinate,
        finish: &Coordinate,
        moves: &[Coordinate],
        path_len: usize,
        path: &SolutionPath,
        rng: &mut impl Rng,
    ) -> Coordinate {
        let progress: f64 = path_len as f64 / self.max_length as f64;
        let grid_factor: f64 = ((self.rows * self.cols) as f64 / 20.0).clamp(0.5, 2.0);
        let greed: f64 = (progress * grid_factor).min(1.0);
        let current_distance: f64 = current.manhattan_distance(finish) as f64;

        let mut best: Coordinate = moves[0];
        let mut best_score: f64 = f64::NEG_INFINITY;
        for candidate in moves {
            let gain: f64 = current_distance - candidate.manhattan_distance(finish) as f64;
            let options: usize = candidate
                .neighbors(self.rows, self.cols)
                .iter()
                .filter(|n| !path.contains(n))
                .count();
            let jitter: f64 = rng.random::<f64>() * (1.25 - greed);
            let score: f64 =
                2.0 * greed * gain + (1.0 - greed) * 0.25 * options as f64 + jitter;
            if score > best_score {
                best_score = score;
                best = *candidate;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn check_path(generated: &GeneratedPath, rows: usize, cols: usize) {
        let cells: &Vec<Coordinate> = generated.path.get();

        assert_eq!(cells[0], Coordinate::new(0, 0));
        assert_eq!(*cells.last().unwrap(), Coordinate::new(rows - 1, cols - 1));
        for cell in cells {
            assert!(cell.in_bounds(rows, cols));
        }

        let mut sorted: Vec<Coordinate> = cells.clone();
        sorted.sort_by_key(|c| (c.row, c.col));
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len(), "duplicated cells in path");

        for pair in cells.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]));
        }
    }

    #[test]
    fn test_generate_small_grid() {
        let mut rng: StdRng = StdRng::seed_from_u64(42);
        let mut generator: PathGenerator = PathGenerator::new(3, 4, 6, 10, 50);
        let generated: GeneratedPath = generator.generate(&mut rng).unwrap();

        check_path(&generated, 3, 4);
        assert!(generated.path.len() >= 6);
        assert!(generated.path.len() <= 10);
        assert!(generated.path.direction_changes() >= 2);
    }

    #[test]
    fn test_generate_many_seeds() {
        for seed in 0..40 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let mut generator: PathGenerator = PathGenerator::new(5, 6, 12, 25, 100);
            let generated: GeneratedPath = generator.generate(&mut rng).unwrap();

            check_path(&generated, 5, 6);
        }
    }

    #[test]
    fn test_commitments_match_path_steps() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let mut generator: PathGenerator = PathGenerator::new(4, 5, 9, 17, 100);
        let generated: GeneratedPath = generator.generate(&mut rng).unwrap();

        for pair in generated.path.get().windows(2) {
            if pair[0].is_diagonal_to(&pair[1]) {
                let block: Coordinate = block_of_step(&pair[0], &pair[1]);
                assert_eq!(
                    generated.commitments.get(&block),
                    Some(&direction_of_step(&pair[0], &pair[1]))
                );
            }
        }
    }

    #[test]
    fn test_impossible_length_bounds() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        // A 3x4 grid has 12 cells, so a 20-cell path cannot exist.
        let mut generator: PathGenerator = PathGenerator::new(3, 4, 20, 25, 10);

        assert_eq!(
            generator.generate(&mut rng).unwrap_err(),
            PathError::AttemptsExhausted
        );
    }
}
