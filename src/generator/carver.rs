/*
carver.rs

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

//! Carve a perfect maze with a randomized depth-first search.
//!
//! The carving starts at the goal. From each cell, the four directions are tried in a random
//! order. Every time a direction leads to an unvisited neighbor, the edge between the two cells is
//! opened and the carving continues from that neighbor. When the neighbor has been fully explored,
//! the carving resumes with the remaining directions of the previous cell.
//!
//! The result is a spanning tree of the grid: every cell is reachable from every other cell, and
//! there is only one way to go from one cell to another.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use super::cell::{Direction, EdgeState, Position};
use super::grid::Grid;
use super::random::RandomSource;

/// Starting position of a player.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct PlayerStart {
    pub position: Position,

    /// Carving depth of the position, which is the distance to the goal.
    pub depth: usize,
}

/// Result of the carving.
#[derive(Debug, Clone)]
pub struct CarvedMaze {
    pub grid: Grid,
    pub goal: Position,

    /// One starting position for each player.
    pub starts: Vec<PlayerStart>,
}

// Carving state of one cell on the stack.
struct Frame {
    position: Position,
    depth: usize,

    // Directions not tried yet, one bit per direction.
    untried: u8,
}

impl Frame {
    fn new(position: Position, depth: usize) -> Self {
        Self {
            position,
            depth,
            untried: 0b1111,
        }
    }

    // Remove and return a random direction among the ones not tried yet.
    fn next_direction(&mut self, rng: &mut RandomSource) -> Direction {
        let remaining: usize = self.untried.count_ones() as usize;
        let mut k: usize = rng.below(remaining);
        let mut bit: u8 = 0;

        for i in 0..4 {
            if self.untried & (1 << i) != 0 {
                if k == 0 {
                    bit = i;
                    break;
                }
                k -= 1;
            }
        }
        self.untried &= !(1 << bit);
        Direction::from_repr(bit).expect("A direction bit is always between 0 and 3")
    }
}

/// [`MazeCarver`] object.
pub struct MazeCarver {
    cols: usize,
    rows: usize,
    num_players: usize,

    /// Number of directions tried during the last carving.
    pub iteration: usize,

    /// Duration in seconds it took to carve the last maze.
    pub duration: f32,

    /// Time when the carving started. Used to compute the [`MazeCarver::duration`].
    start: Instant,
}

impl MazeCarver {
    /// Create a [`MazeCarver`] object for a `cols` x `rows` maze.
    pub fn new(cols: usize, rows: usize, num_players: usize) -> Self {
        assert!(
            cols > 0 && rows > 0,
            "Cannot carve a {cols}x{rows} maze: both dimensions must be positive"
        );

        Self {
            cols,
            rows,
            num_players: num_players.max(1),
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Choose the goal and carve a new maze from it.
    pub fn generate(&mut self, rng: &mut RandomSource) -> CarvedMaze {
        let goal: Position = Position::new(rng.below(self.cols), rng.below(self.rows));
        self.carve_from(goal, rng)
    }

    /// Carve a new maze starting at the given goal.
    pub fn carve_from(&mut self, goal: Position, rng: &mut RandomSource) -> CarvedMaze {
        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let mut grid: Grid = Grid::new(self.cols, self.rows);
        let mut starts: Vec<PlayerStart> = vec![
            PlayerStart {
                position: goal,
                depth: 0,
            };
            self.num_players
        ];
        let mut visited: HashSet<Position> = HashSet::with_capacity(grid.len());
        let mut stack: Vec<Frame> = Vec::with_capacity(grid.len());

        visited.insert(goal);
        stack.push(Frame::new(goal, 0));
        Self::enter(&mut grid, &mut starts, goal, 0);

        while let Some(frame) = stack.last_mut() {
            if frame.untried == 0 {
                stack.pop();
                continue;
            }

            self.iteration += 1;
            let position: Position = frame.position;
            let depth: usize = frame.depth;
            let direction: Direction = frame.next_direction(rng);

            if let Some(n) = grid.neighbor(position, direction) {
                if visited.insert(n) {
                    grid.set_edge(position, direction, EdgeState::Open);
                    Self::enter(&mut grid, &mut starts, n, depth + 1);
                    stack.push(Frame::new(n, depth + 1));
                }
            }
        }

        grid.add_border();
        grid.mirror_edges();
        grid.mark_dead_ends();
        grid.save_original_edges();

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Carved {}x{} maze from {goal}  Start = {}  Depth = {}  Iterations = {}  Duration = {}",
            self.cols, self.rows, starts[0].position, starts[0].depth, self.iteration, self.duration
        );
        grid.debug();

        CarvedMaze { grid, goal, starts }
    }

    // Record the depth of a newly visited cell. A cell at least as deep as the current start of a
    // player becomes its new start.
    fn enter(grid: &mut Grid, starts: &mut [PlayerStart], pos: Position, depth: usize) {
        grid.cell_mut(pos).depth = depth;
        for start in starts.iter_mut() {
            if depth >= start.depth {
                start.position = pos;
                start.depth = depth;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::reachability;

    #[test]
    fn test_spanning_tree() {
        for seed in 0..50 {
            let mut rng: RandomSource = RandomSource::new(seed);
            let cols: usize = 1 + (seed as usize % 9);
            let rows: usize = 1 + (seed as usize % 7);
            let maze: CarvedMaze = MazeCarver::new(cols, rows, 1).generate(&mut rng);

            assert_eq!(maze.grid.count_edges(EdgeState::Open), cols * rows - 1);
            assert_eq!(
                reachability::ReachabilityChecker::new(&maze.grid)
                    .reachable_from(maze.goal)
                    .len(),
                cols * rows
            );
        }
    }

    #[test]
    fn test_border() {
        let mut rng: RandomSource = RandomSource::new(3);
        let maze: CarvedMaze = MazeCarver::new(5, 4, 1).generate(&mut rng);

        for col in 0..5 {
            assert_eq!(
                maze.grid.edge(Position::new(col, 0), Direction::Up),
                EdgeState::Border
            );
            assert_eq!(
                maze.grid.edge(Position::new(col, 3), Direction::Down),
                EdgeState::Border
            );
        }
        for row in 0..4 {
            assert_eq!(
                maze.grid.edge(Position::new(0, row), Direction::Left),
                EdgeState::Border
            );
            assert_eq!(
                maze.grid.edge(Position::new(4, row), Direction::Right),
                EdgeState::Border
            );
        }
        assert_eq!(maze.grid.count_edges(EdgeState::Border), 18);
    }

    #[test]
    fn test_single_cell() {
        let mut rng: RandomSource = RandomSource::new(0);
        let maze: CarvedMaze = MazeCarver::new(1, 1, 2).generate(&mut rng);

        assert_eq!(maze.goal, Position::new(0, 0));
        assert_eq!(maze.grid.count_edges(EdgeState::Open), 0);
        assert_eq!(maze.starts.len(), 2);
        assert!(maze.starts.iter().all(|s| s.position == maze.goal));
    }

    #[test]
    fn test_start_is_deepest_cell() {
        for seed in 0..20 {
            let mut rng: RandomSource = RandomSource::new(seed);
            let maze: CarvedMaze = MazeCarver::new(6, 6, 3).generate(&mut rng);
            let max_depth: usize = maze
                .grid
                .positions()
                .map(|p| maze.grid.cell(p).depth)
                .max()
                .unwrap_or(0);

            assert_eq!(maze.starts.len(), 3);
            for start in &maze.starts {
                assert_eq!(start.depth, max_depth);
                assert_eq!(maze.grid.cell(start.position).depth, max_depth);
            }
            assert_eq!(maze.grid.cell(maze.goal).depth, 0);
        }
    }

    #[test]
    fn test_mirrored_and_original_edges() {
        let mut rng: RandomSource = RandomSource::new(11);
        let maze: CarvedMaze = MazeCarver::new(4, 4, 1).generate(&mut rng);

        for pos in maze.grid.positions() {
            let cell = maze.grid.cell(pos);
            assert_eq!(cell.bottom(), maze.grid.edge(pos, Direction::Down));
            assert_eq!(cell.right(), maze.grid.edge(pos, Direction::Right));
            assert_eq!(cell.original_top(), cell.top());
            assert_eq!(cell.original_left(), cell.left());
            assert_eq!(cell.dead_end, maze.grid.is_dead_end(pos));
        }
    }

    #[test]
    fn test_determinism() {
        let a: CarvedMaze = MazeCarver::new(8, 10, 1).generate(&mut RandomSource::new(42));
        let b: CarvedMaze = MazeCarver::new(8, 10, 1).generate(&mut RandomSource::new(42));

        assert_eq!(a.grid, b.grid);
        assert_eq!(a.goal, b.goal);
        assert_eq!(a.starts, b.starts);
    }
}
