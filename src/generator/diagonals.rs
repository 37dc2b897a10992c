/*
diagonals.rs

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

//! Resolve the diagonal orientation of every 2x2 block.

use log::debug;
use rand::Rng;
use std::collections::HashMap;

use super::coord::{Coordinate, DiagonalDirection};

/// Build the diagonal grid: one orientation per 2x2 block.
///
/// Blocks crossed diagonally by the solution path keep the orientation that
/// the path committed; every other block gets a uniformly random orientation.
/// The result has `rows - 1` rows and `cols - 1` columns, indexed by the
/// top-left cell of each block.
pub fn build_diagonal_grid(
    rows: usize,
    cols: usize,
    commitments: &HashMap<Coordinate, DiagonalDirection>,
    rng: &mut impl Rng,
) -> Vec<Vec<DiagonalDirection>> {
    let mut grid: Vec<Vec<DiagonalDirection>> = Vec::with_capacity(rows - 1);

    for row in 0..rows - 1 {
        let mut line: Vec<DiagonalDirection> = Vec::with_capacity(cols - 1);
        for col in 0..cols - 1 {
            let direction: DiagonalDirection =
                match commitments.get(&Coordinate::new(row, col)) {
                    Some(d) => *d,
                    None => {
                        if rng.random_bool(0.5) {
                            DiagonalDirection::DownRight
                        } else {
                            DiagonalDirection::DownLeft
                        }
                    }
                };
            line.push(direction);
        }
        grid.push(line);
    }
    debug!(
        "Diagonal grid built: {} blocks, {} committed by the path",
        (rows - 1) * (cols - 1),
        commitments.len()
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dimensions() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let grid: Vec<Vec<DiagonalDirection>> =
            build_diagonal_grid(4, 6, &HashMap::new(), &mut rng);

        assert_eq!(grid.len(), 3);
        for line in &grid {
            assert_eq!(line.len(), 5);
        }
    }

    #[test]
    fn test_commitments_are_honored() {
        let mut commitments: HashMap<Coordinate, DiagonalDirection> = HashMap::new();
        commitments.insert(Coordinate::new(0, 0), DiagonalDirection::DownLeft);
        commitments.insert(Coordinate::new(2, 3), DiagonalDirection::DownRight);

        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let grid: Vec<Vec<DiagonalDirection>> =
                build_diagonal_grid(4, 5, &commitments, &mut rng);

            assert_eq!(grid[0][0], DiagonalDirection::DownLeft);
            assert_eq!(grid[2][3], DiagonalDirection::DownRight);
        }
    }

    #[test]
    fn test_uncommitted_blocks_use_both_orientations() {
        let mut rng: StdRng = StdRng::seed_from_u64(5);
        let grid: Vec<Vec<DiagonalDirection>> =
            build_diagonal_grid(6, 6, &HashMap::new(), &mut rng);
        let flat: Vec<DiagonalDirection> = grid.into_iter().flatten().collect();

        assert!(flat.contains(&DiagonalDirection::DownRight));
        assert!(flat.contains(&DiagonalDirection::DownLeft));
    }
}
