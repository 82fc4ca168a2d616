/*
game.rs

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

//! Manage a game in progress.
//!
//! The [`World`] object holds the maze and the players, and applies the game rules when a player
//! moves. The [`Game`] object adds the bots, which are [`MazeSolverAgent`] objects playing
//! through the [`AgentHost`] interface of the world.
//!
//! When a maze ends, the players who reached the goal get a score. See [`maze_score`].

use log::{debug, info};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::agent::{AgentHost, MazeSolverAgent, Step};
use crate::generator::cell::{Direction, EdgeState, Position};
use crate::generator::collectible::{Collectible, CollectibleKind};
use crate::generator::grid::Grid;
use crate::generator::maze::Maze;
use crate::generator::random::RandomSource;
use crate::settings::Settings;

// Points for the rank and the keys are multiplied, penalties for the steps and the time are divided.
const SCORE_MULTIPLIER: i64 = 10;
const SCORE_DIVISOR: i64 = 10;

/// Score of a player who reached the goal.
///
/// `rank` is the arrival order, starting at 0. The first player gets the most points, and every
/// collected key adds points. Every ten steps and every ten seconds cost one point.
pub fn maze_score(
    num_winners: usize,
    rank: usize,
    steps: usize,
    time_taken: Duration,
    keys: usize,
) -> i64 {
    let place: i64 = num_winners.saturating_sub(rank) as i64;
    let steps: i64 = i64::try_from(steps).unwrap_or(i64::MAX);
    let seconds: i64 = i64::try_from(time_taken.as_secs()).unwrap_or(i64::MAX);
    let keys: i64 = i64::try_from(keys).unwrap_or(i64::MAX);

    place * SCORE_MULTIPLIER - steps / SCORE_DIVISOR - seconds / SCORE_DIVISOR
        + keys.saturating_mul(SCORE_MULTIPLIER)
}

/// A player in the maze.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Position,

    /// Item the player holds, if any.
    pub item: Option<CollectibleKind>,

    /// Number of keys the player collected.
    pub keys_collected: usize,

    /// Number of successful moves.
    pub steps: usize,

    /// Whether a bot controls the player.
    pub is_bot: bool,

    /// Time between the start of the maze and the arrival at the goal.
    pub time_taken: Option<Duration>,

    /// Score for the current maze, set when the maze ends.
    pub score_last_maze: i64,

    /// Sum of the scores of all the mazes played.
    pub score_total: i64,
}

impl Player {
    fn new(position: Position) -> Self {
        Self {
            position,
            item: None,
            keys_collected: 0,
            steps: 0,
            is_bot: false,
            time_taken: None,
            score_last_maze: 0,
            score_total: 0,
        }
    }
}

/// Maze, players, and the state of the game.
pub struct World {
    maze: Maze,
    players: Vec<Player>,

    /// Collectibles still in the maze.
    collectibles: Vec<Collectible>,

    /// Number of keys collected by all the players together.
    keys_found: usize,

    /// Number of locks placed in the maze.
    num_locks: usize,

    /// Whether the locks have been opened.
    locks_removed: bool,

    /// Players who reached the goal, in arrival order.
    winners: Vec<usize>,

    mark_trails: bool,

    /// Time when the maze started.
    started: Instant,

    /// Whether the scores of the maze have been given.
    scored: bool,
}

impl World {
    /// Create a [`World`] object and put the players at their starting positions.
    pub fn new(maze: Maze, num_players: usize, mark_trails: bool) -> Self {
        let num_players: usize = num_players.max(1);
        let players: Vec<Player> = (0..num_players)
            .map(|p| Player::new(maze.start(p.min(maze.starts().len() - 1))))
            .collect();
        let collectibles: Vec<Collectible> = maze.collectibles().to_vec();
        let num_locks: usize = maze.num_locks();

        let mut world: World = Self {
            maze,
            players,
            collectibles,
            keys_found: 0,
            num_locks,
            locks_removed: false,
            winners: Vec::new(),
            mark_trails,
            started: Instant::now(),
            scored: false,
        };
        if mark_trails {
            for p in 0..world.players.len() {
                let pos: Position = world.players[p].position;
                world.maze.grid_mut().cell_mut(pos).visited = true;
            }
        }
        world.update_winners(world.started);
        world
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, p: usize) -> &Player {
        &self.players[p]
    }

    pub fn player_mut(&mut self, p: usize) -> &mut Player {
        &mut self.players[p]
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn keys_found(&self) -> usize {
        self.keys_found
    }

    pub fn num_locks(&self) -> usize {
        self.num_locks
    }

    pub fn locks_removed(&self) -> bool {
        self.locks_removed
    }

    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    /// Move the player one cell in the given direction, if the maze allows it.
    ///
    /// A player holding a hazard who pushes against a wall dissolves it and loses the hazard.
    /// Locks and the border cannot be dissolved.
    /// Return whether the player moved.
    pub fn move_player(&mut self, p: usize, direction: Direction) -> bool {
        assert!(
            p < self.players.len(),
            "Player {p} does not exist (there are {} players)",
            self.players.len()
        );

        let pos: Position = self.players[p].position;
        let target: Option<Position> = self.maze.grid().neighbor(pos, direction);

        if self.players[p].item == Some(CollectibleKind::Hazard)
            && target.is_some()
            && self.maze.grid().edge(pos, direction) == EdgeState::Wall
        {
            let grid: &mut Grid = self.maze.grid_mut();
            grid.set_edge(pos, direction, EdgeState::Open);
            grid.mirror_edges();
            self.players[p].item = None;
            debug!("Player {p} dissolved the wall at {pos} {direction:?}");
        }

        match target {
            Some(n) if self.maze.grid().edge(pos, direction) == EdgeState::Open => {
                self.players[p].position = n;
                self.players[p].steps += 1;
                if self.mark_trails {
                    self.maze.grid_mut().cell_mut(n).visited = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Move the player left (negative direction) or right (positive direction).
    pub fn move_player_on_x(&mut self, p: usize, direction: isize) -> bool {
        match direction {
            d if d < 0 => self.move_player(p, Direction::Left),
            d if d > 0 => self.move_player(p, Direction::Right),
            _ => false,
        }
    }

    /// Move the player up (negative direction) or down (positive direction).
    pub fn move_player_on_y(&mut self, p: usize, direction: isize) -> bool {
        match direction {
            d if d < 0 => self.move_player(p, Direction::Up),
            d if d > 0 => self.move_player(p, Direction::Down),
            _ => false,
        }
    }

    /// Give the collectibles to the players standing on them.
    ///
    /// A hazard goes to a player who does not hold an item already. Keys are always collected.
    /// Return `true` when the last key has just been collected and the locks opened.
    pub fn process_collectibles(&mut self) -> bool {
        let mut unlocked: bool = false;

        for p in 0..self.players.len() {
            let pos: Position = self.players[p].position;
            let mut i: usize = 0;

            while i < self.collectibles.len() {
                if self.collectibles[i].position != pos {
                    i += 1;
                    continue;
                }
                match self.collectibles[i].kind {
                    CollectibleKind::Hazard => {
                        if self.players[p].item.is_some() {
                            i += 1;
                            continue;
                        }
                        self.players[p].item = Some(CollectibleKind::Hazard);
                        self.collectibles.remove(i);
                        debug!("Player {p} picked up the hazard at {pos}");
                    }
                    CollectibleKind::Key => {
                        self.collectibles.remove(i);
                        self.players[p].keys_collected += 1;
                        self.keys_found += 1;
                        debug!(
                            "Player {p} found a key at {pos} ({}/{})",
                            self.keys_found, self.num_locks
                        );
                        if !self.locks_removed && self.keys_found >= self.num_locks {
                            self.maze.grid_mut().remove_locks();
                            self.locks_removed = true;
                            unlocked = true;
                            info!("All the keys have been found. The locks are open");
                        }
                    }
                }
            }
        }
        unlocked
    }

    /// Add the players who just reached the goal to the winners, and record their time.
    pub fn update_winners(&mut self, now: Instant) {
        let goal: Position = self.maze.goal();

        for (p, player) in self.players.iter_mut().enumerate() {
            if player.position == goal && !self.winners.contains(&p) {
                let time_taken: Duration = now.saturating_duration_since(self.started);
                info!(
                    "Player {p} reached the goal in {} steps and {:.1} s",
                    player.steps,
                    time_taken.as_secs_f32()
                );
                player.time_taken = Some(time_taken);
                self.winners.push(p);
            }
        }
    }

    /// Give the scores for the maze. Players who did not reach the goal get zero.
    ///
    /// The scores are only given once per maze.
    pub fn score_maze(&mut self) {
        if self.scored {
            return;
        }
        self.scored = true;

        for player in self.players.iter_mut() {
            player.score_last_maze = 0;
        }
        let num_winners: usize = self.winners.len();
        for (rank, &p) in self.winners.iter().enumerate() {
            let player: &mut Player = &mut self.players[p];
            let score: i64 = maze_score(
                num_winners,
                rank,
                player.steps,
                player.time_taken.unwrap_or_default(),
                player.keys_collected,
            );
            player.score_last_maze = score;
            player.score_total += score;
            debug!(
                "Player {p}: score {score}, total {}",
                player.score_total
            );
        }
    }

    /// Whether every human player is at the goal. Also `true` when all the players are bots.
    pub fn all_humans_at_goal(&self) -> bool {
        let goal: Position = self.maze.goal();
        self.players
            .iter()
            .filter(|p| !p.is_bot)
            .all(|p| p.position == goal)
    }
}

impl AgentHost for World {
    fn player_position(&self, player: usize) -> Position {
        self.players[player].position
    }

    fn goal(&self) -> Position {
        self.maze.goal()
    }

    fn edge(&self, pos: Position, direction: Direction) -> EdgeState {
        self.maze.grid().edge(pos, direction)
    }

    fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        self.maze.grid().neighbor(pos, direction)
    }

    fn move_player_on_x(&mut self, player: usize, direction: isize) {
        World::move_player_on_x(self, player, direction);
    }

    fn move_player_on_y(&mut self, player: usize, direction: isize) {
        World::move_player_on_y(self, player, direction);
    }
}

/// Result of a [`Game::run_bots`] session.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub ticks: usize,
    pub winners: Vec<usize>,
    pub keys_found: usize,
    pub num_locks: usize,
    pub locks_removed: bool,

    /// Whether every bot reached the goal before the tick limit.
    pub bots_at_goal: bool,

    /// Number of moves requested by each bot.
    pub bot_moves: Vec<usize>,

    /// Score of each player for the maze.
    pub scores: Vec<i64>,

    /// Score of each player for all the mazes played so far.
    pub score_totals: Vec<i64>,
}

/// Game in progress.
pub struct Game {
    pub world: World,
    bots: Vec<MazeSolverAgent>,
    movement_delay: Duration,
}

impl Game {
    /// Create a [`Game`] object.
    ///
    /// Bots control the last `settings.num_bots` players. Each bot draws its random decisions from
    /// its own stream, derived from the maze seed.
    pub fn new(maze: Maze, settings: &Settings) -> Self {
        let num_players: usize = settings.num_players.max(1);
        let num_bots: usize = settings.num_bots.min(num_players);
        let seed: RandomSource = RandomSource::new(maze.seed());
        let mut world: World = World::new(maze, num_players, settings.mark_trails);

        let bots: Vec<MazeSolverAgent> = (0..num_bots)
            .map(|i| {
                let player: usize = num_players - num_bots + i;
                world.player_mut(player).is_bot = true;
                MazeSolverAgent::new(
                    player,
                    settings.bot_movement_delay(),
                    seed.derive(i as u64),
                )
                .with_algorithm(settings.bot_algorithm)
            })
            .collect();
        debug!(
            "New game with {num_players} players, including {num_bots} bots ({})",
            settings.bot_algorithm
        );

        Self {
            world,
            bots,
            movement_delay: settings.bot_movement_delay(),
        }
    }

    pub fn bots(&self) -> &[MazeSolverAgent] {
        &self.bots
    }

    /// Move a human player and apply the game rules.
    pub fn move_player(&mut self, p: usize, direction: Direction) -> bool {
        let moved: bool = self.world.move_player(p, direction);
        self.after_move(Instant::now());
        moved
    }

    /// End the current maze and start playing the given one.
    ///
    /// The current maze is scored first. The players keep their total score and the bots start
    /// a new exploration.
    pub fn next_maze(&mut self, maze: Maze) {
        self.world.score_maze();

        let previous: Vec<Player> = self.world.players().to_vec();
        let mut world: World = World::new(maze, previous.len(), self.world.mark_trails);
        for (player, old) in world.players.iter_mut().zip(previous.iter()) {
            player.is_bot = old.is_bot;
            player.score_total = old.score_total;
        }
        self.world = world;

        for bot in self.bots.iter_mut() {
            bot.reset();
        }
        info!("New maze from seed {}", self.world.maze().seed());
    }

    /// Let every bot that is not at the goal take a step, if its movement delay has elapsed.
    ///
    /// When all the human players are at the goal, the bots do not wait anymore.
    pub fn tick(&mut self, now: Instant) -> Vec<Step> {
        let hurry: bool = self.world.all_humans_at_goal();
        let mut steps: Vec<Step> = Vec::with_capacity(self.bots.len());

        for i in 0..self.bots.len() {
            let bot: &mut MazeSolverAgent = &mut self.bots[i];
            let step: Step = if bot.at_goal(&self.world) {
                Step::AtGoal
            } else if hurry {
                bot.step(&mut self.world, now)
            } else {
                bot.poll(&mut self.world, now)
            };
            steps.push(step);
            self.after_move(now);
        }
        steps
    }

    /// Whether every bot is at the goal.
    pub fn all_bots_at_goal(&self) -> bool {
        self.bots.iter().all(|b| b.at_goal(&self.world))
    }

    /// Run the bots until they all reach the goal, or until `max_ticks` ticks. The maze is then
    /// scored.
    ///
    /// The clock is simulated: every tick is one movement delay after the previous one, starting
    /// when the maze started.
    pub fn run_bots(&mut self, max_ticks: usize) -> SessionSummary {
        let base: Instant = self.world.started();
        let mut ticks: usize = 0;

        while ticks < max_ticks && !self.all_bots_at_goal() {
            let offset: Duration = self
                .movement_delay
                .saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX));
            self.tick(base + offset);
            ticks += 1;
        }
        self.world.score_maze();

        let summary: SessionSummary = SessionSummary {
            ticks,
            winners: self.world.winners().to_vec(),
            keys_found: self.world.keys_found(),
            num_locks: self.world.num_locks(),
            locks_removed: self.world.locks_removed(),
            bots_at_goal: self.all_bots_at_goal(),
            bot_moves: self.bots.iter().map(|b| b.moves).collect(),
            scores: self.world.players().iter().map(|p| p.score_last_maze).collect(),
            score_totals: self.world.players().iter().map(|p| p.score_total).collect(),
        };
        info!(
            "Session ended after {ticks} ticks  Winners = {:?}  Keys = {}/{}",
            summary.winners, summary.keys_found, summary.num_locks
        );
        summary
    }

    fn after_move(&mut self, now: Instant) {
        if self.world.process_collectibles() {
            for bot in self.bots.iter_mut() {
                bot.all_keys_found();
            }
        }
        self.world.update_winners(now);
    }
}
