/*
generator.rs

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

//! Generate and validate arithmetic path puzzles.
//!
//! The pipeline runs leaf-first:
//!
//! * [`random_path::PathGenerator`] searches a random route from START to
//!   FINISH, recording which diagonal orientation each crossed 2x2 block must
//!   use.
//! * [`diagonals::build_diagonal_grid`] resolves an orientation for every 2x2
//!   block, honoring the path commitments and choosing randomly elsewhere.
//! * [`connectors::build_connector_graph`] enumerates all the horizontal,
//!   vertical, and diagonal connectors.
//! * [`values::ValueAssigner`] gives every connector a value that is unique
//!   among the connectors touching each of its two cells.
//! * [`cells::assign_answers`] sets each cell's answer from its exit
//!   connector (path cells) or a random touching connector (off-path cells).
//! * [`expressions::ExpressionSynthesizer`] produces an arithmetic expression
//!   for each answer.
//! * [`validator::validate`] re-derives and checks every invariant of the
//!   assembled [`puzzle::Puzzle`].
//!
//! [`puzzle::PuzzleGenerator`] drives the stages with bounded retries and
//! aggregates the failure categories.

pub mod cells;
pub mod connectors;
pub mod coord;
pub mod diagonals;
pub mod expressions;
pub mod path;
pub mod puzzle;
pub mod random_path;
pub mod validator;
pub mod values;
