/*
route.rs

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

//! Route followed by a solver agent.

use crate::generator::cell::Position;

/// Route object.
///
/// The route is the stack of the cells between the cell where the exploration started and the
/// current cell. Backtracking pops the last cell.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Route {
    route: Vec<Position>,
}

impl Route {
    pub fn clear(&mut self) {
        self.route.clear();
    }

    /// Add a cell at the end of the route.
    pub fn push(&mut self, pos: Position) {
        self.route.push(pos);
    }

    /// Remove and return the last cell of the route.
    pub fn pop(&mut self) -> Option<Position> {
        self.route.pop()
    }

    /// Number of cells in the route. The depth of the current cell is one less.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    pub fn get_last(&self) -> Option<Position> {
        self.route.last().copied()
    }
}
