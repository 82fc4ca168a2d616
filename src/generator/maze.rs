/*
maze.rs

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

//! Generate a complete maze from a seed.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::carver::{CarvedMaze, MazeCarver, PlayerStart};
use super::cell::{EdgeState, Position};
use super::collectible::Collectible;
use super::dead_ends;
use super::grid::Grid;
use super::locks::{LockPlacement, LockPlacer};
use super::progress::GenerationProgress;
use super::random::RandomSource;

// Seed-derived dimensions: 2 to 29 columns, and 0 to 4 more rows than columns.
const MIN_COLS: usize = 2;
const COLS_RANGE: usize = 28;
const EXTRA_ROWS_RANGE: usize = 5;

/// Default time budget for placing the locks.
pub const DEFAULT_LOCK_TIME_BUDGET: Duration = Duration::from_millis(6000);

/// Maze dimensions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct MazeDimensions {
    pub cols: usize,
    pub rows: usize,
}

impl MazeDimensions {
    /// Draw the dimensions from the random source.
    pub fn from_rng(rng: &mut RandomSource) -> Self {
        let cols: usize = rng.below(COLS_RANGE) + MIN_COLS;
        let rows: usize = cols + rng.below(EXTRA_ROWS_RANGE);
        Self { cols, rows }
    }
}

/// Options for generating a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeOptions {
    pub num_players: usize,

    /// Dimensions that replace the seed-derived ones.
    pub dimensions: Option<MazeDimensions>,

    pub lock_time_budget: Duration,

    /// Probability of placing a hazard.
    pub hazard_chance: f64,

    /// Always place a hazard. For diagnostic purposes.
    pub always_place_hazard: bool,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self {
            num_players: 1,
            dimensions: None,
            lock_time_budget: DEFAULT_LOCK_TIME_BUDGET,
            hazard_chance: 0.1,
            always_place_hazard: false,
        }
    }
}

/// A generated maze, ready to be played.
#[derive(Debug, Clone)]
pub struct Maze {
    seed: u64,
    grid: Grid,
    goal: Position,
    starts: Vec<PlayerStart>,

    /// Dead ends, without the player starts and the goal.
    dead_ends: Vec<Position>,

    collectibles: Vec<Collectible>,
    num_locks: usize,
    num_locks_desired: usize,

    /// Duration in seconds it took to generate the maze.
    pub duration: f32,
}

impl Maze {
    /// Generate the maze for the given seed.
    ///
    /// The random decisions are taken in that order: dimensions, goal, carving, number of locks,
    /// keys, locks, and hazard. The same seed and options always produce the same maze, as long
    /// as the lock placement does not run out of time.
    pub fn generate(
        seed: u64,
        options: &MazeOptions,
        progress: &mut dyn FnMut(GenerationProgress),
    ) -> Self {
        let start: Instant = Instant::now();
        let mut rng: RandomSource = RandomSource::new(seed);

        // Always draw the dimensions so that the rest of the random sequence does not depend on
        // the override
        let drawn: MazeDimensions = MazeDimensions::from_rng(&mut rng);
        let dimensions: MazeDimensions = options.dimensions.unwrap_or(drawn);
        info!(
            "Generating a {}x{} maze from seed {seed}",
            dimensions.cols, dimensions.rows
        );

        let mut carver: MazeCarver =
            MazeCarver::new(dimensions.cols, dimensions.rows, options.num_players);
        let CarvedMaze {
            mut grid,
            goal,
            starts,
        } = carver.generate(&mut rng);
        progress(GenerationProgress::Carved {
            cols: dimensions.cols,
            rows: dimensions.rows,
            goal,
        });

        let start_positions: Vec<Position> = starts.iter().map(|s| s.position).collect();
        let mut excluded: Vec<Position> = start_positions.clone();
        excluded.push(goal);
        let dead_ends: Vec<Position> = dead_ends::collect(&grid, &excluded);

        let mut placer: LockPlacer = LockPlacer::new(options.lock_time_budget)
            .with_hazard(options.hazard_chance, options.always_place_hazard);
        let placement: LockPlacement = placer.place(
            &mut grid,
            &start_positions,
            goal,
            &dead_ends,
            &mut rng,
            progress,
        );
        grid.mirror_edges();
        grid.save_original_edges();

        progress(GenerationProgress::Finished {
            locks: placement.num_locks_placed,
            collectibles: placement.collectibles.len(),
        });
        let duration: f32 = start.elapsed().as_secs_f32();
        debug!(
            "Maze ready  Locks = {}/{}  Collectibles = {}  Duration = {duration}",
            placement.num_locks_placed,
            placement.num_locks_desired,
            placement.collectibles.len()
        );
        grid.debug();

        Self {
            seed,
            grid,
            goal,
            starts,
            dead_ends,
            collectibles: placement.collectibles,
            num_locks: placement.num_locks_placed,
            num_locks_desired: placement.num_locks_desired,
            duration,
        }
    }

    /// Generate the maze for the given seed with the default options and no progress reporting.
    pub fn from_seed(seed: u64) -> Self {
        Self::generate(seed, &MazeOptions::default(), &mut |_| {})
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn starts(&self) -> &[PlayerStart] {
        &self.starts
    }

    /// Starting position of the given player.
    pub fn start(&self, player: usize) -> Position {
        self.starts[player].position
    }

    pub fn dead_ends(&self) -> &[Position] {
        &self.dead_ends
    }

    /// Collectibles as placed during the generation.
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    /// Number of locks placed. This is also the number of keys.
    pub fn num_locks(&self) -> usize {
        self.num_locks
    }

    /// Number of locks the generator tried to place.
    pub fn num_locks_desired(&self) -> usize {
        self.num_locks_desired
    }

    /// Return a serializable view of the maze.
    pub fn snapshot(&self) -> MazeSnapshot {
        MazeSnapshot {
            seed: self.seed,
            cols: self.cols(),
            rows: self.rows(),
            goal: self.goal,
            starts: self.starts.iter().map(|s| s.position).collect(),
            num_locks: self.num_locks,
            collectibles: self.collectibles.clone(),
            dead_ends: self.dead_ends.clone(),
            cells: self
                .grid
                .positions()
                .map(|p| {
                    let cell = self.grid.cell(p);
                    CellSnapshot {
                        col: p.col,
                        row: p.row,
                        top: cell.top(),
                        left: cell.left(),
                        bottom: cell.bottom(),
                        right: cell.right(),
                        depth: cell.depth,
                        dead_end: cell.dead_end,
                        visited: cell.visited,
                    }
                })
                .collect(),
        }
    }
}

/// State of one cell in a [`MazeSnapshot`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CellSnapshot {
    pub col: usize,
    pub row: usize,
    pub top: EdgeState,
    pub left: EdgeState,
    pub bottom: EdgeState,
    pub right: EdgeState,
    pub depth: usize,
    pub dead_end: bool,
    pub visited: bool,
}

/// Everything a host needs to display the maze.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MazeSnapshot {
    pub seed: u64,
    pub cols: usize,
    pub rows: usize,
    pub goal: Position,
    pub starts: Vec<Position>,
    pub num_locks: usize,
    pub collectibles: Vec<Collectible>,
    pub dead_ends: Vec<Position>,
    pub cells: Vec<CellSnapshot>,
}
