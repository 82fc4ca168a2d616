/*
lib.rs

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

//! Random mazes with locks and keys, and an autonomous maze solver.
//!
//! * [`generator`] builds a maze from a seed: carving, dead ends, locks, keys, and hazard.
//! * [`agent`] explores a maze it does not know, and finds the goal.
//! * [`game`] runs a game: players, collectibles, lock opening, and bots.
//! * [`settings`] and [`saver`] manage the user settings and the saved mazes.

pub mod agent;
pub mod game;
pub mod generator;
pub mod saver;
pub mod settings;
