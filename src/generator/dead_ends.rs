/*
dead_ends.rs

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

//! Find the dead ends of a maze.

use log::{Level, debug, log_enabled};

use super::cell::Position;
use super::grid::Grid;

/// Return the dead ends of the grid, row by row, except the excluded positions.
///
/// Player starts and the goal are usually excluded so that no key is placed there.
pub fn collect(grid: &Grid, excluded: &[Position]) -> Vec<Position> {
    let dead_ends: Vec<Position> = grid
        .positions()
        .filter(|p| grid.is_dead_end(*p) && !excluded.contains(p))
        .collect();

    if log_enabled!(Level::Debug) {
        let list: Vec<String> = dead_ends.iter().map(|p| p.to_string()).collect();
        debug!("Dead ends ({}): {}", dead_ends.len(), list.join(" "));
    }
    dead_ends
}
