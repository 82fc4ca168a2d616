/*
cell.rs

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

//! Maze cells, positions, and directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// State of the edge between two cells, or between a cell and the outside of the maze.
///
/// - an `Open` edge is a passage.
/// - a `Wall` edge blocks the way, but a player holding a hazard can dissolve it.
/// - a `Locked` edge blocks the way until all the keys have been collected.
/// - a `Border` edge surrounds the maze and can never be opened.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum EdgeState {
    Open,
    #[default]
    Wall,
    Locked,
    Border,
}

/// Cell coordinates in the grid.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.col, self.row)
    }
}

/// The four moving directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All the directions, in the order used when scanning the neighbors of a cell.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Return the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Return the direction a quarter turn clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Return the direction a quarter turn counterclockwise.
    pub fn counter_clockwise(self) -> Self {
        self.clockwise().opposite()
    }
}

/// One cell of the maze.
///
/// The top and left edges are the primary truth for the passages between cells: the bottom edge
/// of a cell is the top edge of the cell below it, and the right edge is the left edge of the
/// cell on its right. The bottom and right values stored here are derived copies, refreshed by
/// [`crate::generator::grid::Grid::mirror_edges`]. They are only authoritative along the bottom
/// and right borders of the maze.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    top: EdgeState,
    left: EdgeState,
    bottom: EdgeState,
    right: EdgeState,

    /// Top edge as it was at the end of the maze generation, before any lock removal or wall
    /// dissolution.
    original_top: EdgeState,

    /// Left edge as it was at the end of the maze generation.
    original_left: EdgeState,

    /// Distance, in carving steps, from the goal where the carving started.
    pub depth: usize,

    /// Whether the cell was a dead end once carved. Locks and dissolved walls do not change it.
    pub dead_end: bool,

    /// Whether a player walked through the cell. This is the player trail and is not used by any
    /// of the generation or solving algorithms.
    pub visited: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl Cell {
    /// Create a [`Cell`] object with walls on all four sides.
    pub fn new() -> Self {
        Self {
            top: EdgeState::Wall,
            left: EdgeState::Wall,
            bottom: EdgeState::Wall,
            right: EdgeState::Wall,
            original_top: EdgeState::Wall,
            original_left: EdgeState::Wall,
            depth: 0,
            dead_end: false,
            visited: false,
        }
    }

    pub fn top(&self) -> EdgeState {
        self.top
    }

    pub fn left(&self) -> EdgeState {
        self.left
    }

    pub fn bottom(&self) -> EdgeState {
        self.bottom
    }

    pub fn right(&self) -> EdgeState {
        self.right
    }

    pub fn original_top(&self) -> EdgeState {
        self.original_top
    }

    pub fn original_left(&self) -> EdgeState {
        self.original_left
    }

    /// Set the top edge. The bottom edge of the cell above is not updated.
    pub fn set_top(&mut self, state: EdgeState) {
        self.top = state;
    }

    /// Set the left edge. The right edge of the cell on the left is not updated.
    pub fn set_left(&mut self, state: EdgeState) {
        self.left = state;
    }

    pub fn set_bottom(&mut self, state: EdgeState) {
        self.bottom = state;
    }

    pub fn set_right(&mut self, state: EdgeState) {
        self.right = state;
    }

    /// Record the current top and left edges as the original ones.
    pub fn save_original_edges(&mut self) {
        self.original_top = self.top;
        self.original_left = self.left;
    }

    /// Return the stored state of the edge on the given side.
    pub fn edge(&self, direction: Direction) -> EdgeState {
        match direction {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Number of sides with the given state.
    pub fn num_edges(&self, state: EdgeState) -> usize {
        Direction::ALL
            .iter()
            .filter(|d| self.edge(**d) == state)
            .count()
    }

    /// Whether exactly one of the four edges is open.
    pub fn is_dead_end(&self) -> bool {
        self.num_edges(EdgeState::Open) == 1
    }

    pub fn has_top_lock(&self) -> bool {
        self.top == EdgeState::Locked
    }

    pub fn has_left_lock(&self) -> bool {
        self.left == EdgeState::Locked
    }

    /// Whether one of the two owned edges (top and left) is locked.
    pub fn has_lock(&self) -> bool {
        self.has_top_lock() || self.has_left_lock()
    }

    /// Open all the locked edges of the cell.
    pub fn remove_locks(&mut self) {
        for edge in [
            &mut self.top,
            &mut self.left,
            &mut self.bottom,
            &mut self.right,
        ] {
            if *edge == EdgeState::Locked {
                *edge = EdgeState::Open;
            }
        }
    }
}
