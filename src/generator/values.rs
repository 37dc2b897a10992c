/*
values.rs

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

//! Assign a value to every connector.
//!
//! The core invariant is per-cell uniqueness: all the connectors touching a
//! cell must carry pairwise-distinct values, so that a cell's answer selects
//! exactly one exit. The assignment is greedy-random without backtracking;
//! when a connector runs out of legal values, the whole attempt fails and the
//! orchestrator resamples the path.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::{HashMap, HashSet};

use super::connectors::Connector;
use super::coord::Coordinate;
use super::path::SolutionPath;

/// Fraction of the path connectors reserved for division-friendly values.
const DIVISION_RESERVATION: f64 = 0.25;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ValueError {
    /// A connector has no legal value left given its neighbors' assignments.
    Exhausted { connector: usize },
}

/// Result of a successful assignment.
#[derive(Debug, Clone)]
pub struct ValuedConnectors {
    /// All the connectors, with their values set.
    pub connectors: Vec<Connector>,

    /// Indices of the connectors reserved for division expressions.
    pub division_connectors: HashSet<usize>,
}

/// [`ValueAssigner`] object.
pub struct ValueAssigner<'a> {
    /// Smallest assignable connector value.
    min_value: i32,

    /// Largest assignable connector value.
    max_value: i32,

    /// Whether division expressions are enabled in the settings.
    division_enabled: bool,

    /// Largest operand for multiplication and division expressions. Reserved
    /// division connectors prefer values within this range.
    mult_div_range: i32,

    /// Solution path, used to locate the connectors that lie on it.
    path: &'a SolutionPath,
}

impl<'a> ValueAssigner<'a> {
    /// Create the object.
    pub fn new(
        min_value: i32,
        max_value: i32,
        division_enabled: bool,
        mult_div_range: i32,
        path: &'a SolutionPath,
    ) -> Self {
        Self {
            min_value,
            max_value,
            division_enabled,
            mult_div_range,
            path,
        }
    }

    /// Assign a value to every connector.
    ///
    /// If division is enabled, a quarter of the path connectors (at least
    /// one) are reserved and assigned first, preferring small values so that
    /// later division-expression synthesis has a guaranteed in-range target.
    /// All the remaining connectors are assigned in random order.
    ///
    /// # Errors
    ///
    /// The method returns an error when a connector has no available value.
    /// Corner cells touch at most 3 connectors and interior cells up to 8,
    /// so starvation is rare with the configured ranges, but an unlucky
    /// path/diagonal combination can produce it. The caller must resample
    /// the whole attempt.
    pub fn assign(
        &self,
        mut connectors: Vec<Connector>,
        rng: &mut impl Rng,
    ) -> Result<ValuedConnectors, ValueError> {
        let touch_map: HashMap<Coordinate, Vec<usize>> = Self::build_touch_map(&connectors);
        let mut values: Vec<Option<i32>> = vec![None; connectors.len()];

        // Reserve and assign the division-friendly connectors first.
        let division_connectors: HashSet<usize> =
            self.reserve_division_connectors(&connectors, rng);
        for &index in sorted(&division_connectors) {
            let used: HashSet<i32> = Self::used_values(index, &connectors, &touch_map, &values);
            let small: Vec<i32> = (self.min_value..=self.max_value)
                .filter(|v| *v <= self.mult_div_range && !used.contains(v))
                .collect();
            let candidates: Vec<i32> = if small.is_empty() {
                debug!("No small value free for division connector {index}");
                (self.min_value..=self.max_value)
                    .filter(|v| !used.contains(v))
                    .collect()
            } else {
                small
            };
            match candidates.choose(rng) {
                Some(v) => values[index] = Some(*v),
                None => return Err(ValueError::Exhausted { connector: index }),
            }
        }

        // Assign the remaining connectors in random order.
        let mut order: Vec<usize> = (0..connectors.len()).collect();
        order.shuffle(rng);
        for index in order {
            if values[index].is_some() {
                continue;
            }
            let used: HashSet<i32> = Self::used_values(index, &connectors, &touch_map, &values);
            let candidates: Vec<i32> = (self.min_value..=self.max_value)
                .filter(|v| !used.contains(v))
                .collect();
            match candidates.choose(rng) {
                Some(v) => values[index] = Some(*v),
                None => {
                    debug!(
                        "Connector {index} ({} - {}) has no legal value left",
                        connectors[index].cell_a, connectors[index].cell_b
                    );
                    return Err(ValueError::Exhausted { connector: index });
                }
            }
        }

        for (connector, value) in connectors.iter_mut().zip(values) {
            // Every entry was filled above.
            connector.value = value.unwrap_or(self.min_value);
        }
        Ok(ValuedConnectors {
            connectors,
            division_connectors,
        })
    }

    /// Map each cell to the indices of the connectors touching it.
    fn build_touch_map(connectors: &[Connector]) -> HashMap<Coordinate, Vec<usize>> {
        let mut touch_map: HashMap<Coordinate, Vec<usize>> = HashMap::new();

        for (index, connector) in connectors.iter().enumerate() {
            touch_map.entry(connector.cell_a).or_default().push(index);
            touch_map.entry(connector.cell_b).or_default().push(index);
        }
        touch_map
    }

    /// Values already carried by the connectors that share a cell with the
    /// given connector.
    fn used_values(
        index: usize,
        connectors: &[Connector],
        touch_map: &HashMap<Coordinate, Vec<usize>>,
        values: &[Option<i32>],
    ) -> HashSet<i32> {
        let mut used: HashSet<i32> = HashSet::new();

        for cell in [&connectors[index].cell_a, &connectors[index].cell_b] {
            if let Some(neighbors) = touch_map.get(cell) {
                for &neighbor in neighbors {
                    if neighbor != index
                        && let Some(v) = values[neighbor]
                    {
                        used.insert(v);
                    }
                }
            }
        }
        used
    }

    /// Pick the subset of path connectors reserved for division values.
    ///
    /// Empty when division is disabled or the path is shorter than two cells.
    fn reserve_division_connectors(
        &self,
        connectors: &[Connector],
        rng: &mut impl Rng,
    ) -> HashSet<usize> {
        if !self.division_enabled || self.path.len() < 2 {
            return HashSet::new();
        }

        let mut on_path: Vec<usize> = Vec::with_capacity(self.path.len());
        for pair in self.path.get().windows(2) {
            if let Some(index) = connectors.iter().position(|c| c.joins(&pair[0], &pair[1])) {
                on_path.push(index);
            }
        }
        if on_path.is_empty() {
            return HashSet::new();
        }

        let count: usize = ((on_path.len() as f64 * DIVISION_RESERVATION) as usize).max(1);
        on_path.shuffle(rng);
        debug!(
            "Reserving {count} of {} path connectors for division",
            on_path.len()
        );
        on_path.into_iter().take(count).collect()
    }
}

/// Return the indices of the set in ascending order.
///
/// Iterating a [`HashSet`] directly would make the value assignment depend on
/// the hash order, breaking seeded reproducibility.
fn sorted(indices: &HashSet<usize>) -> std::vec::IntoIter<&usize> {
    let mut v: Vec<&usize> = indices.iter().collect();
    v.sort_unstable();
    v.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    use crate::generator::connectors::build_connector_graph;
    use crate::generator::coord::DiagonalDirection;
    use crate::generator::diagonals::build_diagonal_grid;
    use crate::generator::random_path::{GeneratedPath, PathGenerator};

    fn generate(
        rows: usize,
        cols: usize,
        min_value: i32,
        max_value: i32,
        division: bool,
        seed: u64,
    ) -> Result<(ValuedConnectors, SolutionPath), ValueError> {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut generator: PathGenerator =
            PathGenerator::new(rows, cols, 4, rows * cols * 17 / 20, 100);
        let generated: GeneratedPath = generator.generate(&mut rng).unwrap();
        let diagonal_grid: Vec<Vec<DiagonalDirection>> =
            build_diagonal_grid(rows, cols, &generated.commitments, &mut rng);
        let connectors: Vec<Connector> = build_connector_graph(rows, cols, &diagonal_grid);
        let assigner: ValueAssigner =
            ValueAssigner::new(min_value, max_value, division, 12, &generated.path);

        assigner
            .assign(connectors, &mut rng)
            .map(|valued| (valued, generated.path))
    }

    fn check_per_cell_uniqueness(connectors: &[Connector], rows: usize, cols: usize) {
        for row in 0..rows {
            for col in 0..cols {
                let cell: Coordinate = Coordinate::new(row, col);
                let mut values: Vec<i32> = connectors
                    .iter()
                    .filter(|c| c.touches(&cell))
                    .map(|c| c.value)
                    .collect();
                let count: usize = values.len();
                values.sort_unstable();
                values.dedup();
                assert_eq!(values.len(), count, "duplicate value at cell {cell}");
            }
        }
    }

    #[test]
    fn test_per_cell_uniqueness() {
        for seed in 0..25 {
            let (valued, _) = generate(4, 5, 1, 20, false, seed).unwrap();
            check_per_cell_uniqueness(&valued.connectors, 4, 5);
        }
    }

    #[test]
    fn test_values_within_range() {
        let (valued, _) = generate(3, 4, 5, 18, false, 2).unwrap();

        for connector in &valued.connectors {
            assert!(connector.value >= 5 && connector.value <= 18);
        }
        assert!(valued.division_connectors.is_empty());
    }

    #[test]
    fn test_division_reservation() {
        let (valued, path) = generate(5, 6, 1, 30, true, 8).unwrap();

        assert!(!valued.division_connectors.is_empty());
        let path_connector_count: usize = path.len() - 1;
        assert!(valued.division_connectors.len() <= path_connector_count.div_ceil(4) + 1);
        for &index in &valued.division_connectors {
            let connector: &Connector = &valued.connectors[index];
            // Reserved connectors lie on the solution path.
            assert!(
                path.get()
                    .windows(2)
                    .any(|pair| connector.joins(&pair[0], &pair[1]))
            );
        }
    }

    #[test]
    fn test_exhaustion_is_reported() {
        // A single available value cannot satisfy per-cell uniqueness.
        let result: Result<(ValuedConnectors, SolutionPath), ValueError> =
            generate(3, 4, 7, 7, false, 4);

        assert!(matches!(result, Err(ValueError::Exhausted { .. })));
    }
}
