/*
settings.rs

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

//! Difficulty presets and generation settings.
//!
//! Ten built-in presets are provided, from [`Difficulty::Starter`] (3x4 grid,
//! addition only) to [`Difficulty::Master`] (7x8 grid, all four operations).
//! [`DifficultySettings::custom`] builds a settings object that callers can
//! adjust field by field.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Difficulty preset.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Starter,
    Easy,
    Mild,
    Medium,
    Tricky,
    Challenging,
    Hard,
    Tough,
    Expert,
    Master,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Starter => write!(f, "Starter"),
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Mild => write!(f, "Mild"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Tricky => write!(f, "Tricky"),
            Difficulty::Challenging => write!(f, "Challenging"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Tough => write!(f, "Tough"),
            Difficulty::Expert => write!(f, "Expert"),
            Difficulty::Master => write!(f, "Master"),
        }
    }
}

impl Difficulty {
    /// Number of built-in presets.
    pub const COUNT: i32 = 10;

    /// All the presets, in ascending order of difficulty.
    pub fn all() -> Vec<Difficulty> {
        (0..Self::COUNT).filter_map(Difficulty::from_repr).collect()
    }

    /// Fully-populated settings for the preset.
    pub fn settings(&self) -> DifficultySettings {
        let base: DifficultySettings = DifficultySettings {
            name: self.to_string(),
            ..DifficultySettings::custom(3, 4)
        };

        match self {
            Difficulty::Starter => DifficultySettings {
                subtraction: false,
                multiplication: false,
                division: false,
                add_sub_range: 10,
                connector_max: 11,
                seconds_per_step: 14.0,
                ..base
            },
            Difficulty::Easy => DifficultySettings {
                multiplication: false,
                division: false,
                add_sub_range: 15,
                connector_max: 12,
                seconds_per_step: 13.0,
                ..base
            },
            Difficulty::Mild => DifficultySettings {
                rows: 4,
                cols: 4,
                multiplication: false,
                division: false,
                add_sub_range: 20,
                connector_max: 14,
                seconds_per_step: 12.0,
                ..base
            },
            Difficulty::Medium => DifficultySettings {
                rows: 4,
                cols: 5,
                division: false,
                add_sub_range: 20,
                mult_div_range: 10,
                connector_max: 16,
                seconds_per_step: 11.0,
                ..base
            },
            Difficulty::Tricky => DifficultySettings {
                rows: 4,
                cols: 5,
                division: false,
                add_sub_range: 30,
                mult_div_range: 12,
                connector_max: 18,
                seconds_per_step: 10.0,
                ..base
            },
            Difficulty::Challenging => DifficultySettings {
                rows: 5,
                cols: 5,
                add_sub_range: 30,
                mult_div_range: 12,
                connector_max: 20,
                seconds_per_step: 9.0,
                ..base
            },
            Difficulty::Hard => DifficultySettings {
                rows: 5,
                cols: 6,
                add_sub_range: 50,
                mult_div_range: 12,
                connector_max: 24,
                seconds_per_step: 8.0,
                ..base
            },
            Difficulty::Tough => DifficultySettings {
                rows: 6,
                cols: 6,
                add_sub_range: 60,
                mult_div_range: 12,
                connector_min: 2,
                connector_max: 26,
                seconds_per_step: 7.0,
                ..base
            },
            Difficulty::Expert => DifficultySettings {
                rows: 6,
                cols: 7,
                add_sub_range: 80,
                mult_div_range: 14,
                connector_min: 2,
                connector_max: 30,
                hidden_mode: true,
                seconds_per_step: 6.0,
                ..base
            },
            Difficulty::Master => DifficultySettings {
                rows: 7,
                cols: 8,
                add_sub_range: 99,
                mult_div_range: 14,
                connector_min: 2,
                connector_max: 36,
                hidden_mode: true,
                seconds_per_step: 5.0,
                ..base
            },
        }
    }
}

/// Selection weights for the enabled operations.
///
/// The weights are relative; only the ratio between enabled operations
/// matters.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct OperationWeights {
    pub addition: u32,
    pub subtraction: u32,
    pub multiplication: u32,
    pub division: u32,
}

impl Default for OperationWeights {
    fn default() -> Self {
        Self {
            addition: 3,
            subtraction: 3,
            multiplication: 2,
            division: 2,
        }
    }
}

/// Parameters of a puzzle generation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DifficultySettings {
    /// Preset name, or `custom`.
    pub name: String,

    /// Enabled operations. At least one must be enabled.
    pub addition: bool,
    pub subtraction: bool,
    pub multiplication: bool,
    pub division: bool,

    /// Largest operand for addition and subtraction expressions.
    pub add_sub_range: i32,

    /// Largest factor and divisor for multiplication and division
    /// expressions.
    pub mult_div_range: i32,

    /// Smallest assignable connector value.
    pub connector_min: i32,

    /// Largest assignable connector value.
    pub connector_max: i32,

    /// Number of rows in the grid.
    pub rows: usize,

    /// Number of columns in the grid.
    pub cols: usize,

    /// Minimum number of cells in the solution path. Zero means that the
    /// bound is derived from the grid area.
    pub min_path_length: usize,

    /// Maximum number of cells in the solution path. Zero means that the
    /// bound is derived from the grid area.
    pub max_path_length: usize,

    /// Operation selection weights.
    pub weights: OperationWeights,

    /// Whether mistakes are revealed only at the end of the game. The
    /// generator carries the flag for the gameplay layer and never reads it.
    pub hidden_mode: bool,

    /// Pacing for the gameplay timer, in seconds per path step. Carried for
    /// the gameplay layer.
    pub seconds_per_step: f32,
}

impl DifficultySettings {
    /// Settings for a custom puzzle on the given grid, with all the
    /// operations enabled and moderate ranges.
    pub fn custom(rows: usize, cols: usize) -> Self {
        Self {
            name: String::from("custom"),
            addition: true,
            subtraction: true,
            multiplication: true,
            division: true,
            add_sub_range: 30,
            mult_div_range: 12,
            connector_min: 1,
            connector_max: 20,
            rows,
            cols,
            min_path_length: 0,
            max_path_length: 0,
            weights: OperationWeights::default(),
            hidden_mode: false,
            seconds_per_step: 8.0,
        }
    }

    /// Whether at least one operation is enabled.
    pub fn any_operation_enabled(&self) -> bool {
        self.addition || self.subtraction || self.multiplication || self.division
    }

    /// Minimum and maximum path lengths, derived from the grid area when not
    /// set explicitly.
    ///
    /// The minimum is a graduated percentage of the total cell count (but
    /// never less than 4); the maximum is about 85% of the total cell count.
    pub fn path_length_bounds(&self) -> (usize, usize) {
        let area: usize = self.rows * self.cols;
        let min: usize = if self.min_path_length > 0 {
            self.min_path_length
        } else {
            let percentage: f64 = if area <= 16 {
                0.50
            } else if area <= 25 {
                0.55
            } else if area <= 42 {
                0.50
            } else {
                0.45
            };
            ((area as f64 * percentage).round() as usize).max(4)
        };
        let max: usize = if self.max_path_length > 0 {
            self.max_path_length
        } else {
            (area as f64 * 0.85).round() as usize
        };
        (min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets() {
        let presets: Vec<Difficulty> = Difficulty::all();

        assert_eq!(presets.len(), 10);
        for preset in presets {
            let settings: DifficultySettings = preset.settings();

            assert!(settings.any_operation_enabled());
            assert!(settings.rows >= 3 && settings.cols >= 4);
            assert!(settings.connector_min < settings.connector_max);
            assert!(settings.add_sub_range >= 10);
            assert_eq!(settings.name, preset.to_string());
        }
    }

    #[test]
    fn test_starter_is_addition_only() {
        let settings: DifficultySettings = Difficulty::Starter.settings();

        assert!(settings.addition);
        assert!(!settings.subtraction);
        assert!(!settings.multiplication);
        assert!(!settings.division);
    }

    #[test]
    fn test_path_length_bounds_derived() {
        let settings: DifficultySettings = DifficultySettings::custom(3, 4);
        let (min, max) = settings.path_length_bounds();

        // 12 cells: 50% minimum, 85% maximum.
        assert_eq!(min, 6);
        assert_eq!(max, 10);
    }

    #[test]
    fn test_path_length_bounds_explicit() {
        let mut settings: DifficultySettings = DifficultySettings::custom(5, 5);
        settings.min_path_length = 8;
        settings.max_path_length = 14;

        assert_eq!(settings.path_length_bounds(), (8, 14));
    }

    #[test]
    fn test_path_length_minimum_floor() {
        let settings: DifficultySettings = DifficultySettings::custom(3, 3);

        // 9 cells at 50% would be 5; still above the floor of 4.
        let (min, _) = settings.path_length_bounds();
        assert!(min >= 4);
    }

    #[test]
    fn test_from_repr() {
        assert_eq!(Difficulty::from_repr(0), Some(Difficulty::Starter));
        assert_eq!(Difficulty::from_repr(9), Some(Difficulty::Master));
        assert_eq!(Difficulty::from_repr(10), None);
    }
}
