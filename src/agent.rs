/*
agent.rs

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

//! Autonomous maze solvers.
//!
//! A [`MazeSolverAgent`] object controls one player. It knows nothing about the maze in advance:
//! at every step it looks at the four edges around the player and moves to one of the open
//! neighbors. How it chooses depends on its [`BotAlgorithm`].
//!
//! The agent acts through an [`AgentHost`] object, which gives the player position and the edge
//! states, and moves the player.

pub mod route;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use strum_macros::FromRepr;

use crate::generator::cell::{Direction, EdgeState, Position};
use crate::generator::random::RandomSource;
use route::Route;

/// Default minimum delay between two moves of an agent.
pub const DEFAULT_MOVEMENT_DELAY: Duration = Duration::from_millis(300);

// Order in which the agent looks around.
const SCAN_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Exploration strategy of the bots.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, FromRepr, Default,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum BotAlgorithm {
    /// Randomized depth-first search, going back along the route at dead ends
    #[default]
    DepthFirstSearch,

    /// Depth-first searches limited to a depth that grows by one after every search
    IterativeDeepening,

    /// Follow the wall on the right-hand side
    RightHandRule,

    /// Follow the wall on the left-hand side
    LeftHandRule,
}

impl fmt::Display for BotAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BotAlgorithm::DepthFirstSearch => write!(f, "depth-first search"),
            BotAlgorithm::IterativeDeepening => write!(f, "iterative deepening depth-first search"),
            BotAlgorithm::RightHandRule => write!(f, "right-hand rule"),
            BotAlgorithm::LeftHandRule => write!(f, "left-hand rule"),
        }
    }
}

/// Services that the game provides to the agents.
pub trait AgentHost {
    /// Current position of the given player.
    fn player_position(&self, player: usize) -> Position;

    fn goal(&self) -> Position;

    /// Current state of the edge on the given side of the cell.
    fn edge(&self, pos: Position, direction: Direction) -> EdgeState;

    /// Position of the neighbor cell in the given direction, if any.
    fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position>;

    /// Move the player one cell left (negative direction) or right (positive direction).
    fn move_player_on_x(&mut self, player: usize, direction: isize);

    /// Move the player one cell up (negative direction) or down (positive direction).
    fn move_player_on_y(&mut self, player: usize, direction: isize);
}

/// Outcome of one agent poll.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Step {
    /// The movement delay has not elapsed yet.
    Waiting,

    /// The player is at the goal. Nothing to do.
    AtGoal,

    /// The agent moved to a cell it had not visited yet.
    Explored(Position),

    /// The agent went back to a cell it already visited.
    Backtracked(Position),

    /// Every reachable cell has been visited and there is nowhere to go back to.
    /// The agent stays in place until the locks open.
    Stalled,
}

/// [`MazeSolverAgent`] object.
#[derive(Debug, Clone)]
pub struct MazeSolverAgent {
    /// Index of the player the agent controls.
    player: usize,

    algorithm: BotAlgorithm,
    movement_delay: Duration,

    /// Time of the last move, or `None` if the agent has not moved yet.
    last_move: Option<Instant>,

    visited: HashSet<Position>,
    route: Route,

    /// Locked edges seen during the exploration.
    known_locked: HashSet<(Position, Direction)>,

    /// Direction of the last move. Used by the wall followers.
    heading: Direction,

    /// Depth limit of the current iterative deepening search.
    depth_limit: usize,

    /// Whether the current iterative deepening search stopped at the depth limit somewhere.
    limit_hit: bool,

    rng: RandomSource,

    /// Number of moves requested so far, including the backtracking moves.
    pub moves: usize,
}

impl MazeSolverAgent {
    /// Create a [`MazeSolverAgent`] object for the given player.
    ///
    /// The agent uses the depth-first search. See [`MazeSolverAgent::with_algorithm`].
    pub fn new(player: usize, movement_delay: Duration, rng: RandomSource) -> Self {
        Self {
            player,
            algorithm: BotAlgorithm::default(),
            movement_delay,
            last_move: None,
            visited: HashSet::new(),
            route: Route::default(),
            known_locked: HashSet::new(),
            heading: Direction::Up,
            depth_limit: 0,
            limit_hit: false,
            rng,
            moves: 0,
        }
    }

    /// Select the exploration strategy.
    pub fn with_algorithm(mut self, algorithm: BotAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn algorithm(&self) -> BotAlgorithm {
        self.algorithm
    }

    /// Forget everything. Used when a new maze starts.
    pub fn reset(&mut self) {
        self.last_move = None;
        self.visited.clear();
        self.route.clear();
        self.known_locked.clear();
        self.heading = Direction::Up;
        self.depth_limit = 0;
        self.limit_hit = false;
        self.moves = 0;
    }

    /// Whether the movement delay has elapsed since the last move.
    pub fn done_waiting(&self, now: Instant) -> bool {
        self.last_move
            .is_none_or(|t| now.saturating_duration_since(t) >= self.movement_delay)
    }

    pub fn at_goal(&self, host: &dyn AgentHost) -> bool {
        host.player_position(self.player) == host.goal()
    }

    /// Cells visited since the exploration started.
    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn known_locked(&self) -> &HashSet<(Position, Direction)> {
        &self.known_locked
    }

    /// Move if the movement delay has elapsed.
    pub fn poll(&mut self, host: &mut dyn AgentHost, now: Instant) -> Step {
        if !self.done_waiting(now) {
            return Step::Waiting;
        }
        self.step(host, now)
    }

    /// Take one exploration step, regardless of the movement delay.
    pub fn step(&mut self, host: &mut dyn AgentHost, now: Instant) -> Step {
        let pos: Position = host.player_position(self.player);
        if pos == host.goal() {
            return Step::AtGoal;
        }

        self.last_move = Some(now);
        let open: Vec<(Direction, Position)> = self.sense(host, pos);

        match self.algorithm {
            BotAlgorithm::DepthFirstSearch => self.step_depth_first(host, pos, &open),
            BotAlgorithm::IterativeDeepening => self.step_iterative_deepening(host, pos, &open),
            BotAlgorithm::RightHandRule => {
                self.step_wall_follower(host, pos, &open, Direction::clockwise)
            }
            BotAlgorithm::LeftHandRule => {
                self.step_wall_follower(host, pos, &open, Direction::counter_clockwise)
            }
        }
    }

    /// Restart the exploration from the current position. Called when all the keys have been
    /// collected and the locks are open.
    pub fn all_keys_found(&mut self) {
        debug!(
            "Agent {}: all keys found, restarting the exploration ({} cells visited)",
            self.player,
            self.visited.len()
        );
        self.visited.clear();
        self.route.clear();
        self.known_locked.clear();
        self.depth_limit = 0;
        self.limit_hit = false;
    }

    // Look at the four edges around the cell. Record the locks, and return the open directions
    // with the neighbor behind them, in scan order.
    fn sense(&mut self, host: &dyn AgentHost, pos: Position) -> Vec<(Direction, Position)> {
        let mut open: Vec<(Direction, Position)> = Vec::with_capacity(4);

        for d in SCAN_ORDER {
            match host.edge(pos, d) {
                EdgeState::Open => {
                    if let Some(n) = host.neighbor(pos, d) {
                        open.push((d, n));
                    }
                }
                EdgeState::Locked => {
                    if self.known_locked.insert((pos, d)) {
                        debug!("Agent {}: lock found at {pos} {d:?}", self.player);
                    }
                }
                EdgeState::Wall | EdgeState::Border => (),
            }
        }
        open
    }

    fn step_depth_first(
        &mut self,
        host: &mut dyn AgentHost,
        pos: Position,
        open: &[(Direction, Position)],
    ) -> Step {
        if self.route.get_last() != Some(pos) {
            self.route.push(pos);
        }
        self.visited.insert(pos);

        let candidates: Vec<Position> = open
            .iter()
            .map(|(_, n)| *n)
            .filter(|n| !self.visited.contains(n))
            .collect();
        if candidates.is_empty() {
            return self.backtrack(host, pos);
        }

        let next: Position = candidates[self.rng.below(candidates.len())];
        self.route.push(next);
        self.move_toward(host, pos, next);
        Step::Explored(next)
    }

    // The first unvisited neighbor in scan order is always taken. When the search is over and it
    // stopped at the depth limit somewhere, a deeper search starts from the same cell.
    fn step_iterative_deepening(
        &mut self,
        host: &mut dyn AgentHost,
        pos: Position,
        open: &[(Direction, Position)],
    ) -> Step {
        if self.route.is_empty() {
            self.deepen(pos);
        }

        let next: Option<Position> = open
            .iter()
            .map(|(_, n)| *n)
            .find(|n| !self.visited.contains(n));

        match next {
            Some(n) if self.route.len() <= self.depth_limit => {
                self.visited.insert(n);
                self.route.push(n);
                self.move_toward(host, pos, n);
                Step::Explored(n)
            }
            Some(_) => {
                self.limit_hit = true;
                self.backtrack(host, pos)
            }
            None if self.route.len() < 2 && self.limit_hit => {
                self.route.clear();
                self.step_iterative_deepening(host, pos, open)
            }
            None => self.backtrack(host, pos),
        }
    }

    // Start a new depth-limited search from `pos`, one cell deeper than the previous one.
    fn deepen(&mut self, pos: Position) {
        self.depth_limit += 1;
        self.limit_hit = false;
        self.visited.clear();
        self.visited.insert(pos);
        self.route.clear();
        self.route.push(pos);
        debug!(
            "Agent {}: searching from {pos} with depth limit {}",
            self.player, self.depth_limit
        );
    }

    // Keep one hand on the wall. `hand` gives the side of the hand from the heading: the agent
    // turns to that side when it can, else goes straight, else turns to the other side, else
    // turns back.
    fn step_wall_follower(
        &mut self,
        host: &mut dyn AgentHost,
        pos: Position,
        open: &[(Direction, Position)],
        hand: fn(Direction) -> Direction,
    ) -> Step {
        self.visited.insert(pos);

        let side: Direction = hand(self.heading);
        for d in [side, self.heading, side.opposite(), self.heading.opposite()] {
            if let Some(&(_, n)) = open.iter().find(|(o, _)| *o == d) {
                self.heading = d;
                self.move_toward(host, pos, n);
                return if self.visited.contains(&n) {
                    Step::Backtracked(n)
                } else {
                    Step::Explored(n)
                };
            }
        }
        Step::Stalled
    }

    // Go back to the previous cell of the route.
    fn backtrack(&mut self, host: &mut dyn AgentHost, pos: Position) -> Step {
        if self.route.len() < 2 {
            return Step::Stalled;
        }
        self.route.pop();
        let back: Position = match self.route.get_last() {
            Some(p) => p,
            None => return Step::Stalled,
        };
        self.move_toward(host, pos, back);
        Step::Backtracked(back)
    }

    fn move_toward(&mut self, host: &mut dyn AgentHost, from: Position, to: Position) {
        self.moves += 1;
        if to.col < from.col {
            host.move_player_on_x(self.player, -1);
        } else if to.col > from.col {
            host.move_player_on_x(self.player, 1);
        } else if to.row < from.row {
            host.move_player_on_y(self.player, -1);
        } else if to.row > from.row {
            host.move_player_on_y(self.player, 1);
        }
    }
}
