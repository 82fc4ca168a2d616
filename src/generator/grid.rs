/*
grid.rs

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

//! Rectangular grid of maze cells.

use log::{Level, debug, log_enabled};

use super::cell::{Cell, Direction, EdgeState, Position};

/// Grid of `cols` x `rows` cells.
///
/// The cells are stored in a flat array, row after row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a [`Grid`] object with walls everywhere.
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(
            cols > 0 && rows > 0,
            "Cannot create a {cols}x{rows} grid: both dimensions must be positive"
        );

        Self {
            cols,
            rows,
            cells: vec![Cell::new(); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the position is inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.col < self.cols && pos.row < self.rows
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "Position {pos} is outside the {}x{} grid",
            self.cols,
            self.rows
        );
        pos.row * self.cols + pos.col
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let i: usize = self.index(pos);
        &mut self.cells[i]
    }

    /// Return all the positions, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols: usize = self.cols;
        (0..self.cells.len()).map(move |i| Position::new(i % cols, i / cols))
    }

    /// Return the position of the neighbor cell in the given direction, if it exists.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up if pos.row > 0 => Some(Position::new(pos.col, pos.row - 1)),
            Direction::Down if pos.row + 1 < self.rows => {
                Some(Position::new(pos.col, pos.row + 1))
            }
            Direction::Left if pos.col > 0 => Some(Position::new(pos.col - 1, pos.row)),
            Direction::Right if pos.col + 1 < self.cols => {
                Some(Position::new(pos.col + 1, pos.row))
            }
            _ => None,
        }
    }

    /// Return the state of the edge on the given side of the cell.
    ///
    /// The bottom and right edges are read from the top and left edges of the neighbor cells, so
    /// the result does not depend on whether [`Grid::mirror_edges`] has been run.
    pub fn edge(&self, pos: Position, direction: Direction) -> EdgeState {
        match (direction, self.neighbor(pos, direction)) {
            (Direction::Up, _) => self.cell(pos).top(),
            (Direction::Left, _) => self.cell(pos).left(),
            (Direction::Down, Some(n)) => self.cell(n).top(),
            (Direction::Right, Some(n)) => self.cell(n).left(),
            (Direction::Down, None) => self.cell(pos).bottom(),
            (Direction::Right, None) => self.cell(pos).right(),
        }
    }

    /// Set the state of the edge on the given side of the cell.
    ///
    /// Only the cell that owns the edge is updated: the top or left edge of `pos` or of the
    /// neighbor below or on the right. The derived bottom and right copies are refreshed by
    /// [`Grid::mirror_edges`].
    pub fn set_edge(&mut self, pos: Position, direction: Direction, state: EdgeState) {
        match (direction, self.neighbor(pos, direction)) {
            (Direction::Up, _) => self.cell_mut(pos).set_top(state),
            (Direction::Left, _) => self.cell_mut(pos).set_left(state),
            (Direction::Down, Some(n)) => self.cell_mut(n).set_top(state),
            (Direction::Right, Some(n)) => self.cell_mut(n).set_left(state),
            (Direction::Down, None) => self.cell_mut(pos).set_bottom(state),
            (Direction::Right, None) => self.cell_mut(pos).set_right(state),
        }
    }

    /// Copy the top and left edges of every cell to the bottom edge of the cell above and to the
    /// right edge of the cell on the left.
    pub fn mirror_edges(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos: Position = Position::new(col, row);

                if row + 1 < self.rows {
                    let below: EdgeState = self.cell(Position::new(col, row + 1)).top();
                    self.cell_mut(pos).set_bottom(below);
                }
                if col + 1 < self.cols {
                    let right: EdgeState = self.cell(Position::new(col + 1, row)).left();
                    self.cell_mut(pos).set_right(right);
                }
            }
        }
    }

    /// Surround the grid with [`EdgeState::Border`] edges.
    pub fn add_border(&mut self) {
        for col in 0..self.cols {
            self.cell_mut(Position::new(col, 0)).set_top(EdgeState::Border);
            self.cell_mut(Position::new(col, self.rows - 1))
                .set_bottom(EdgeState::Border);
        }
        for row in 0..self.rows {
            self.cell_mut(Position::new(0, row)).set_left(EdgeState::Border);
            self.cell_mut(Position::new(self.cols - 1, row))
                .set_right(EdgeState::Border);
        }
    }

    /// Count the distinct edges in the given state.
    ///
    /// Every edge between two cells is counted once, from the cell that owns it.
    pub fn count_edges(&self, state: EdgeState) -> usize {
        let mut count: usize = 0;

        for pos in self.positions() {
            for direction in [Direction::Up, Direction::Left] {
                if self.edge(pos, direction) == state {
                    count += 1;
                }
            }
            if pos.row + 1 == self.rows && self.edge(pos, Direction::Down) == state {
                count += 1;
            }
            if pos.col + 1 == self.cols && self.edge(pos, Direction::Right) == state {
                count += 1;
            }
        }
        count
    }

    /// Whether exactly one of the four edges around the cell is open.
    pub fn is_dead_end(&self, pos: Position) -> bool {
        Direction::ALL
            .iter()
            .filter(|d| self.edge(pos, **d) == EdgeState::Open)
            .count()
            == 1
    }

    /// Record the current dead-end state of every cell in [`Cell::dead_end`].
    pub fn mark_dead_ends(&mut self) {
        for pos in self.positions() {
            let dead_end: bool = self.is_dead_end(pos);
            self.cell_mut(pos).dead_end = dead_end;
        }
    }

    /// Return the neighbors reachable through an open edge.
    pub fn open_neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter(|d| self.edge(pos, **d) == EdgeState::Open)
            .filter_map(|d| self.neighbor(pos, *d))
            .collect()
    }

    /// Number of locked edges.
    pub fn lock_count(&self) -> usize {
        self.count_edges(EdgeState::Locked)
    }

    /// Open all the locked edges.
    pub fn remove_locks(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.remove_locks();
        }
        self.mirror_edges();
    }

    /// Record the current top and left edges of every cell as their original edges.
    pub fn save_original_edges(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.save_original_edges();
        }
    }

    /// Return a text drawing of the grid.
    ///
    /// Walls are drawn with `-` and `|`, locks with `L`, and the border with `=` and `#`.
    pub fn to_ascii(&self) -> String {
        let mut s: String = String::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                s.push('+');
                s.push_str(match self.edge(Position::new(col, row), Direction::Up) {
                    EdgeState::Open => "   ",
                    EdgeState::Wall => "---",
                    EdgeState::Locked => "-L-",
                    EdgeState::Border => "===",
                });
            }
            s.push_str("+\n");

            for col in 0..self.cols {
                let pos: Position = Position::new(col, row);
                s.push(side_char(self.edge(pos, Direction::Left)));
                s.push_str(if self.cell(pos).visited { " . " } else { "   " });
            }
            s.push(side_char(
                self.edge(Position::new(self.cols - 1, row), Direction::Right),
            ));
            s.push('\n');
        }

        for col in 0..self.cols {
            s.push('+');
            s.push_str(
                match self.edge(Position::new(col, self.rows - 1), Direction::Down) {
                    EdgeState::Open => "   ",
                    EdgeState::Wall => "---",
                    EdgeState::Locked => "-L-",
                    EdgeState::Border => "===",
                },
            );
        }
        s.push_str("+\n");
        s
    }

    /// Print the grid.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!("Grid {}x{}:", self.cols, self.rows);
        for line in self.to_ascii().lines() {
            debug!("{line}");
        }
    }
}

fn side_char(state: EdgeState) -> char {
    match state {
        EdgeState::Open => ' ',
        EdgeState::Wall => '|',
        EdgeState::Locked => 'L',
        EdgeState::Border => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid() {
        let grid: Grid = Grid::new(3, 2);

        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.count_edges(EdgeState::Open), 0);
        assert_eq!(
            grid.positions().collect::<Vec<Position>>(),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "both dimensions must be positive")]
    fn test_zero_size_grid() {
        Grid::new(0, 4);
    }

    #[test]
    #[should_panic(expected = "outside the 2x2 grid")]
    fn test_out_of_range() {
        let grid: Grid = Grid::new(2, 2);
        grid.cell(Position::new(2, 0));
    }

    #[test]
    fn test_neighbors() {
        let grid: Grid = Grid::new(2, 2);
        let p: Position = Position::new(0, 0);

        assert_eq!(grid.neighbor(p, Direction::Up), None);
        assert_eq!(grid.neighbor(p, Direction::Left), None);
        assert_eq!(grid.neighbor(p, Direction::Down), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(p, Direction::Right), Some(Position::new(1, 0)));
        assert_eq!(grid.neighbor(Position::new(1, 1), Direction::Right), None);
    }

    #[test]
    fn test_set_edge_is_not_mirrored() {
        let mut grid: Grid = Grid::new(2, 2);
        let p: Position = Position::new(0, 0);

        grid.set_edge(p, Direction::Down, EdgeState::Open);

        // The edge is owned by the cell below
        assert_eq!(grid.cell(Position::new(0, 1)).top(), EdgeState::Open);
        assert_eq!(grid.edge(p, Direction::Down), EdgeState::Open);
        assert_eq!(grid.cell(p).bottom(), EdgeState::Wall);

        grid.mirror_edges();
        assert_eq!(grid.cell(p).bottom(), EdgeState::Open);
    }

    #[test]
    fn test_border_and_dead_ends() {
        let mut grid: Grid = Grid::new(3, 1);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Open);
        grid.set_edge(Position::new(1, 0), Direction::Right, EdgeState::Open);
        grid.add_border();
        grid.mirror_edges();

        assert_eq!(grid.count_edges(EdgeState::Open), 2);
        assert_eq!(grid.count_edges(EdgeState::Border), 8);
        assert!(grid.is_dead_end(Position::new(0, 0)));
        assert!(!grid.is_dead_end(Position::new(1, 0)));
        assert!(grid.is_dead_end(Position::new(2, 0)));
        assert_eq!(
            grid.open_neighbors(Position::new(1, 0)),
            vec![Position::new(0, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_dead_end_flag_survives_locks() {
        let mut grid: Grid = Grid::new(3, 1);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Open);
        grid.set_edge(Position::new(1, 0), Direction::Right, EdgeState::Open);
        grid.add_border();
        grid.mirror_edges();
        grid.mark_dead_ends();

        // Seal the dead end on the right
        grid.set_edge(Position::new(2, 0), Direction::Left, EdgeState::Locked);
        grid.mirror_edges();

        assert!(!grid.is_dead_end(Position::new(2, 0)));
        assert!(grid.cell(Position::new(2, 0)).dead_end);
        assert!(grid.cell(Position::new(0, 0)).dead_end);
        assert!(!grid.cell(Position::new(1, 0)).dead_end);
    }

    #[test]
    fn test_remove_locks() {
        let mut grid: Grid = Grid::new(2, 2);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Locked);
        grid.set_edge(Position::new(0, 0), Direction::Down, EdgeState::Open);
        grid.mirror_edges();
        grid.save_original_edges();
        assert_eq!(grid.lock_count(), 1);
        assert_eq!(grid.cell(Position::new(0, 0)).right(), EdgeState::Locked);

        grid.remove_locks();
        assert_eq!(grid.lock_count(), 0);
        assert_eq!(grid.cell(Position::new(0, 0)).right(), EdgeState::Open);
        assert_eq!(
            grid.cell(Position::new(1, 0)).original_left(),
            EdgeState::Locked
        );
    }

    #[test]
    fn test_ascii() {
        let mut grid: Grid = Grid::new(2, 1);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Locked);
        grid.add_border();
        grid.mirror_edges();

        assert_eq!(grid.to_ascii(), "+===+===+\n#   L   #\n+===+===+\n");
    }
}
