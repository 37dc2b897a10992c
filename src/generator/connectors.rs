/*
connectors.rs

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

//! Connectors between adjacent cells in the puzzle grid.

use serde::{Deserialize, Serialize};

use super::coord::{Coordinate, DiagonalDirection};

/// Orientation family of a connector.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectorType {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Labeled link between two 8-adjacent cells.
///
/// Connectors are undirected for gameplay purposes, but `cell_a` and `cell_b`
/// are fixed at construction. A diagonal connector belongs to exactly one 2x2
/// block and carries that block's orientation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Connector {
    pub kind: ConnectorType,
    pub cell_a: Coordinate,
    pub cell_b: Coordinate,
    pub value: i32,
    pub direction: Option<DiagonalDirection>,
}

impl Connector {
    /// Whether the connector touches the given cell.
    pub fn touches(&self, cell: &Coordinate) -> bool {
        self.cell_a == *cell || self.cell_b == *cell
    }

    /// Whether the connector links the two given cells, in either order.
    pub fn joins(&self, a: &Coordinate, b: &Coordinate) -> bool {
        (self.cell_a == *a && self.cell_b == *b) || (self.cell_a == *b && self.cell_b == *a)
    }

    /// Return the cell at the other end of the connector.
    ///
    /// Return [`None`] if the connector does not touch the given cell.
    pub fn other_end(&self, cell: &Coordinate) -> Option<Coordinate> {
        if self.cell_a == *cell {
            Some(self.cell_b)
        } else if self.cell_b == *cell {
            Some(self.cell_a)
        } else {
            None
        }
    }
}

/// Enumerate all the connectors implied by the grid size and the diagonal
/// grid, with their values unset.
///
/// The function is deterministic: `rows * (cols - 1)` horizontal connectors,
/// `(rows - 1) * cols` vertical connectors, and `(rows - 1) * (cols - 1)`
/// diagonal connectors, one per block, oriented per the diagonal grid.
pub fn build_connector_graph(
    rows: usize,
    cols: usize,
    diagonal_grid: &[Vec<DiagonalDirection>],
) -> Vec<Connector> {
    let total: usize = rows * (cols - 1) + (rows - 1) * cols + (rows - 1) * (cols - 1);
    let mut connectors: Vec<Connector> = Vec::with_capacity(total);

    for row in 0..rows {
        for col in 0..cols - 1 {
            connectors.push(Connector {
                kind: ConnectorType::Horizontal,
                cell_a: Coordinate::new(row, col),
                cell_b: Coordinate::new(row, col + 1),
                value: 0,
                direction: None,
            });
        }
    }
    for row in 0..rows - 1 {
        for col in 0..cols {
            connectors.push(Connector {
                kind: ConnectorType::Vertical,
                cell_a: Coordinate::new(row, col),
                cell_b: Coordinate::new(row + 1, col),
                value: 0,
                direction: None,
            });
        }
    }
    for row in 0..rows - 1 {
        for col in 0..cols - 1 {
            let direction: DiagonalDirection = diagonal_grid[row][col];
            let (cell_a, cell_b) = match direction {
                DiagonalDirection::DownRight => {
                    (Coordinate::new(row, col), Coordinate::new(row + 1, col + 1))
                }
                DiagonalDirection::DownLeft => {
                    (Coordinate::new(row, col + 1), Coordinate::new(row + 1, col))
                }
            };
            connectors.push(Connector {
                kind: ConnectorType::Diagonal,
                cell_a,
                cell_b,
                value: 0,
                direction: Some(direction),
            });
        }
    }
    connectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    use crate::generator::diagonals::build_diagonal_grid;

    fn graph(rows: usize, cols: usize, seed: u64) -> Vec<Connector> {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let diagonal_grid: Vec<Vec<DiagonalDirection>> =
            build_diagonal_grid(rows, cols, &HashMap::new(), &mut rng);
        build_connector_graph(rows, cols, &diagonal_grid)
    }

    #[test]
    fn test_connector_counts() {
        let connectors: Vec<Connector> = graph(3, 4, 11);
        let horizontal: usize = connectors
            .iter()
            .filter(|c| c.kind == ConnectorType::Horizontal)
            .count();
        let vertical: usize = connectors
            .iter()
            .filter(|c| c.kind == ConnectorType::Vertical)
            .count();
        let diagonal: usize = connectors
            .iter()
            .filter(|c| c.kind == ConnectorType::Diagonal)
            .count();

        assert_eq!(horizontal, 3 * 3);
        assert_eq!(vertical, 2 * 4);
        assert_eq!(diagonal, 2 * 3);
        assert_eq!(connectors.len(), 9 + 8 + 6);
    }

    #[test]
    fn test_all_connectors_link_adjacent_cells() {
        for connector in graph(5, 6, 3) {
            assert!(connector.cell_a.is_adjacent(&connector.cell_b));
            if connector.kind == ConnectorType::Diagonal {
                assert!(connector.cell_a.is_diagonal_to(&connector.cell_b));
                assert!(connector.direction.is_some());
            } else {
                assert!(connector.direction.is_none());
            }
        }
    }

    #[test]
    fn test_one_diagonal_per_block() {
        let connectors: Vec<Connector> = graph(4, 5, 9);
        let mut blocks: Vec<(usize, usize)> = connectors
            .iter()
            .filter(|c| c.kind == ConnectorType::Diagonal)
            .map(|c| {
                (
                    c.cell_a.row.min(c.cell_b.row),
                    c.cell_a.col.min(c.cell_b.col),
                )
            })
            .collect();
        blocks.sort_unstable();
        blocks.dedup();

        // Exactly one diagonal per 2x2 block, never both.
        assert_eq!(blocks.len(), 3 * 4);
    }

    #[test]
    fn test_joins_and_other_end() {
        let connector: Connector = Connector {
            kind: ConnectorType::Horizontal,
            cell_a: Coordinate::new(1, 1),
            cell_b: Coordinate::new(1, 2),
            value: 0,
            direction: None,
        };

        assert!(connector.joins(&Coordinate::new(1, 2), &Coordinate::new(1, 1)));
        assert!(!connector.joins(&Coordinate::new(1, 1), &Coordinate::new(2, 1)));
        assert_eq!(
            connector.other_end(&Coordinate::new(1, 1)),
            Some(Coordinate::new(1, 2))
        );
        assert_eq!(connector.other_end(&Coordinate::new(0, 0)), None);
    }
}
