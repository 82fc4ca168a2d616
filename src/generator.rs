/*
generator.rs

Copyright 2025 Hervé Quatremain

This file is part of Lockmaze.

Lockmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Lockmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Lockmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate random mazes with locks and keys.
//!
//! A maze is entirely defined by a seed. [`maze::Maze::generate`] builds it in several steps:
//!
//! * The dimensions are drawn from the seed ([`maze::MazeDimensions::from_rng`]).
//! * A [`carver::MazeCarver`] object chooses the goal and carves a perfect maze from it.
//!   The deepest cell becomes the starting position of the players.
//! * [`dead_ends::collect`] lists the dead ends, where the keys can be placed.
//! * A [`locks::LockPlacer`] object places the keys, the locks, and sometimes a hazard.
//!   It uses a [`reachability::ReachabilityChecker`] object to verify that every key can still
//!   be reached after adding a lock.
//!   The placement is bounded by a time budget. If the budget expires, then the maze gets fewer
//!   locks and keys than expected, but it can still be solved.
//!
//! All the random decisions are taken from one [`random::RandomSource`] object, so the same seed
//! always produces the same maze.

pub mod carver;
pub mod cell;
pub mod collectible;
pub mod dead_ends;
pub mod grid;
pub mod locks;
pub mod maze;
pub mod progress;
pub mod random;
pub mod reachability;
