/*
maze_properties.rs

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

use std::time::{Duration, Instant};

use lockmaze::agent::{AgentHost, MazeSolverAgent, Step};
use lockmaze::game::{Game, SessionSummary};
use lockmaze::generator::carver::{CarvedMaze, MazeCarver};
use lockmaze::generator::cell::{Direction, EdgeState, Position};
use lockmaze::generator::grid::Grid;
use lockmaze::generator::maze::{Maze, MazeDimensions, MazeOptions, MazeSnapshot};
use lockmaze::generator::random::RandomSource;
use lockmaze::generator::reachability;
use lockmaze::saver::seed::SaverSeed;
use lockmaze::settings::Settings;

// One player in a grid, without game rules.
struct GridHost {
    grid: Grid,
    position: Position,
    goal: Position,
}

impl GridHost {
    fn from_carved(maze: CarvedMaze) -> Self {
        Self {
            position: maze.starts[0].position,
            goal: maze.goal,
            grid: maze.grid,
        }
    }

    fn try_move(&mut self, direction: Direction) {
        if self.grid.edge(self.position, direction) == EdgeState::Open {
            if let Some(n) = self.grid.neighbor(self.position, direction) {
                self.position = n;
            }
        }
    }
}

impl AgentHost for GridHost {
    fn player_position(&self, _player: usize) -> Position {
        self.position
    }

    fn goal(&self) -> Position {
        self.goal
    }

    fn edge(&self, pos: Position, direction: Direction) -> EdgeState {
        self.grid.edge(pos, direction)
    }

    fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.grid.neighbor(pos, direction)
    }

    fn move_player_on_x(&mut self, _player: usize, direction: isize) {
        self.try_move(if direction < 0 {
            Direction::Left
        } else {
            Direction::Right
        });
    }

    fn move_player_on_y(&mut self, _player: usize, direction: isize) {
        self.try_move(if direction < 0 {
            Direction::Up
        } else {
            Direction::Down
        });
    }
}

fn options(cols: usize, rows: usize, budget_ms: u64) -> MazeOptions {
    MazeOptions {
        dimensions: Some(MazeDimensions { cols, rows }),
        lock_time_budget: Duration::from_millis(budget_ms),
        ..MazeOptions::default()
    }
}

// Number of ticks the agent needs to reach the goal, or None if it did not within the limit.
fn solve(host: &mut GridHost, seed: u64, max_ticks: usize) -> Option<usize> {
    let mut agent: MazeSolverAgent =
        MazeSolverAgent::new(0, Duration::ZERO, RandomSource::new(seed).derive(0));
    let now: Instant = Instant::now();

    for tick in 0..=max_ticks {
        if agent.step(host, now) == Step::AtGoal {
            return Some(tick);
        }
    }
    None
}

#[test]
fn carved_mazes_are_perfect() {
    for seed in 0..100 {
        let cols: usize = 1 + (seed as usize * 7) % 12;
        let rows: usize = 1 + (seed as usize * 5) % 11;
        let maze: CarvedMaze = MazeCarver::new(cols, rows, 1).generate(&mut RandomSource::new(seed));

        assert_eq!(
            maze.grid.count_edges(EdgeState::Open),
            cols * rows - 1,
            "seed {seed}: {cols}x{rows}"
        );
        for pos in maze.grid.positions() {
            assert!(reachability::can_reach(&maze.grid, maze.goal, pos));
        }
    }
}

#[test]
fn seed_derived_dimensions() {
    for seed in 0..10 {
        let maze: Maze = Maze::generate(
            seed,
            &MazeOptions {
                lock_time_budget: Duration::from_millis(100),
                ..MazeOptions::default()
            },
            &mut |_| {},
        );

        assert!((2..=29).contains(&maze.cols()));
        assert!(maze.rows() >= maze.cols() && maze.rows() <= maze.cols() + 4);
    }
}

#[test]
fn same_seed_same_maze() {
    for seed in [0, 1, 77, 4096, u64::MAX] {
        let a: Maze = Maze::generate(seed, &options(10, 10, 3000), &mut |_| {});
        let b: Maze = Maze::generate(seed, &options(10, 10, 3000), &mut |_| {});

        // An expired budget depends on the machine speed
        if a.num_locks() == a.num_locks_desired() && b.num_locks() == b.num_locks_desired() {
            assert_eq!(a.snapshot(), b.snapshot(), "seed {seed}");
        }
    }
}

#[test]
fn locked_mazes_stay_solvable() {
    for seed in 0..40 {
        let maze: Maze = Maze::generate(seed, &options(9, 11, 300), &mut |_| {});
        let keys: usize = maze.collectibles().iter().filter(|c| c.is_key()).count();
        let targets: Vec<Position> = maze.collectibles().iter().map(|c| c.position).collect();
        let mut grid: Grid = maze.grid().clone();

        assert!(maze.num_locks() <= keys);
        assert_eq!(maze.num_locks(), keys);
        assert_eq!(grid.lock_count(), maze.num_locks());
        for start in maze.starts() {
            assert!(
                reachability::can_reach_all(&grid, start.position, &targets),
                "seed {seed}: a collectible is locked away"
            );
        }

        grid.remove_locks();
        assert!(reachability::can_reach(&grid, maze.start(0), maze.goal()));
        for start in maze.starts() {
            assert!(
                reachability::can_reach_all(&grid, start.position, &targets),
                "seed {seed}: a collectible is out of reach once unlocked"
            );
        }
        assert_eq!(grid.count_edges(EdgeState::Open), 9 * 11 - 1);
    }
}

#[test]
fn four_by_four_seed_one() {
    let maze: CarvedMaze = MazeCarver::new(4, 4, 1).generate(&mut RandomSource::new(1));
    assert_eq!(maze.grid.count_edges(EdgeState::Open), 15);

    let mut host: GridHost = GridHost::from_carved(maze);
    let ticks: Option<usize> = solve(&mut host, 1, 32);

    assert!(ticks.is_some(), "The agent did not reach the goal in 32 ticks");
    assert_eq!(host.position, host.goal);
}

#[test]
fn agent_terminates_on_unlocked_mazes() {
    for seed in 0..50 {
        let cols: usize = 2 + seed as usize % 10;
        let rows: usize = 2 + seed as usize % 8;
        let maze: CarvedMaze = MazeCarver::new(cols, rows, 1).generate(&mut RandomSource::new(seed));
        let mut host: GridHost = GridHost::from_carved(maze);

        assert!(
            solve(&mut host, seed, 2 * cols * rows).is_some(),
            "seed {seed}: {cols}x{rows}"
        );
    }
}

#[test]
fn bots_solve_generated_mazes() {
    let settings: Settings = Settings {
        num_players: 3,
        num_bots: 3,
        bot_movement_delay_ms: 50,
        ..Settings::default()
    };

    for seed in 100..115 {
        let mut game_options: MazeOptions = options(12, 14, 300);
        game_options.num_players = 3;
        game_options.always_place_hazard = true;
        let maze: Maze = Maze::generate(seed, &game_options, &mut |_| {});
        let num_locks: usize = maze.num_locks();
        let mut game: Game = Game::new(maze, &settings);
        let summary: SessionSummary = game.run_bots(50_000);

        assert!(summary.bots_at_goal, "seed {seed}: {summary:?}");
        assert_eq!(summary.winners.len(), 3);
        assert_eq!(summary.keys_found, num_locks);
    }
}

#[test]
fn saved_seed_regenerates_maze() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("Temporary directory");
    let saver: SaverSeed = SaverSeed::new(dir.path().join("maze.seed"));
    let original: Maze = Maze::generate(31337, &options(8, 8, 3000), &mut |_| {});

    saver.save_seed(original.seed()).expect("Seed saved");
    let seed: u64 = saver
        .get_seed()
        .expect("Seed loaded")
        .expect("Seed file exists");
    let loaded: Maze = Maze::generate(seed, &options(8, 8, 3000), &mut |_| {});

    assert_eq!(seed, 31337);
    if original.num_locks() == original.num_locks_desired()
        && loaded.num_locks() == loaded.num_locks_desired()
    {
        let a: MazeSnapshot = original.snapshot();
        let b: MazeSnapshot = loaded.snapshot();
        assert_eq!(a, b);
    }
}
