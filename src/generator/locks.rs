/*
locks.rs

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

//! Place locks, keys, and the optional hazard in a carved maze.
//!
//! The keys are placed first, in dead ends. The first lock always blocks the way to the goal.
//! The other locks are placed at random, and a lock is kept only if every collectible can still
//! be reached from every player start. Because the locks only open when all the keys have been
//! collected, this guarantees that the maze can always be solved.
//!
//! The random placement is bounded by a time budget. When the budget expires before all the
//! desired locks are placed, the extra keys are removed so that there are never more locks than
//! keys.

use log::debug;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::cell::{Direction, EdgeState, Position};
use super::collectible::{Collectible, CollectibleKind};
use super::grid::Grid;
use super::progress::GenerationProgress;
use super::random::RandomSource;
use super::reachability::ReachabilityChecker;

/// The desired number of locks is a random number below that value, further limited by the
/// number of columns and by the number of dead ends.
pub const MAX_LOCK_ROLL: usize = 10;

// Order in which the edges of the goal are considered for the first lock.
const GOAL_LOCK_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Result of the lock placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LockPlacement {
    /// Number of locks in the maze. There are exactly as many keys.
    pub num_locks_placed: usize,

    /// Number of locks the placer tried to place.
    pub num_locks_desired: usize,

    /// Keys, and possibly one hazard.
    pub collectibles: Vec<Collectible>,

    /// Whether the time budget expired before all the desired locks were placed.
    pub budget_expired: bool,
}

/// [`LockPlacer`] object.
pub struct LockPlacer {
    time_budget: Duration,
    hazard_chance: f64,
    always_place_hazard: bool,

    /// Number of random lock attempts during the last placement.
    pub iteration: usize,

    /// Duration in seconds of the last placement.
    pub duration: f32,

    /// Time when the placement started. Used for the budget and for [`LockPlacer::duration`].
    start: Instant,
}

impl LockPlacer {
    /// Create a [`LockPlacer`] object that never places a hazard.
    pub fn new(time_budget: Duration) -> Self {
        Self {
            time_budget,
            hazard_chance: 0.0,
            always_place_hazard: false,
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Set the probability of placing a hazard. When `always` is `true`, the hazard is always
    /// placed.
    pub fn with_hazard(mut self, chance: f64, always: bool) -> Self {
        self.hazard_chance = chance;
        self.always_place_hazard = always;
        self
    }

    /// Place the locks, the keys, and the hazard.
    ///
    /// The `dead_ends` list should not include the player starts nor the goal.
    /// Only the top and left edges of the cells are updated; the caller mirrors them.
    pub fn place(
        &mut self,
        grid: &mut Grid,
        starts: &[Position],
        goal: Position,
        dead_ends: &[Position],
        rng: &mut RandomSource,
        progress: &mut dyn FnMut(GenerationProgress),
    ) -> LockPlacement {
        assert!(
            !starts.is_empty(),
            "Cannot place locks without at least one player start"
        );

        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        // A key that can only be reached through the goal would be stuck behind the goal lock
        let mut candidates: Vec<Position> = Self::reachable_dead_ends(grid, starts, goal, dead_ends);
        let num_locks_desired: usize =
            rng.below(MAX_LOCK_ROLL) % grid.cols().min(candidates.len().max(1));

        let mut collectibles: Vec<Collectible> = Vec::with_capacity(num_locks_desired + 1);
        for _ in 0..num_locks_desired {
            if candidates.is_empty() {
                candidates.push(starts[0]);
            }
            let chosen: usize = rng.below(candidates.len());
            collectibles.push(Collectible::key(candidates.remove(chosen)));
        }
        let targets: Vec<Position> = collectibles.iter().map(|c| c.position).collect();

        let mut num_locks_placed: usize = 0;
        if num_locks_desired > 0 {
            if let Some(direction) = Self::goal_lock_side(grid, starts[0], goal) {
                grid.set_edge(goal, direction, EdgeState::Locked);
                if Self::all_reachable(grid, starts, &targets) {
                    num_locks_placed = 1;
                    debug!("Placed lock 1 at {goal} {direction:?}");
                } else {
                    grid.set_edge(goal, direction, EdgeState::Open);
                }
            }
        }

        while num_locks_placed > 0
            && num_locks_placed < num_locks_desired
            && self.start.elapsed() < self.time_budget
        {
            self.iteration += 1;
            let pos: Position = Position::new(rng.below(grid.cols()), rng.below(grid.rows()));
            let direction: Option<Direction> = if grid.edge(pos, Direction::Up) == EdgeState::Open
            {
                Some(Direction::Up)
            } else if grid.edge(pos, Direction::Left) == EdgeState::Open {
                Some(Direction::Left)
            } else {
                None
            };

            if let Some(d) = direction {
                grid.set_edge(pos, d, EdgeState::Locked);
                if Self::all_reachable(grid, starts, &targets) {
                    num_locks_placed += 1;
                    debug!("Placed lock {num_locks_placed} at {pos} {d:?}");
                } else {
                    grid.set_edge(pos, d, EdgeState::Open);
                }
            }

            progress(GenerationProgress::LockAttempt {
                attempt: self.iteration,
                placed: num_locks_placed,
                desired: num_locks_desired,
            });
        }

        let budget_expired: bool = num_locks_placed < num_locks_desired;
        while count_keys(&collectibles) > num_locks_placed {
            match collectibles.iter().rposition(|c| c.is_key()) {
                Some(i) => {
                    let removed: Collectible = collectibles.remove(i);
                    debug!("Removed the {removed}");
                }
                None => break,
            }
        }

        if self.always_place_hazard || rng.chance(self.hazard_chance) {
            let hazard: Position = Self::hazard_position(grid, starts, &candidates, rng);
            debug!("Placed hazard at {hazard}");
            collectibles.push(Collectible::hazard(hazard));
        }

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Locks placed = {num_locks_placed}  Desired = {num_locks_desired}  Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );

        LockPlacement {
            num_locks_placed,
            num_locks_desired,
            collectibles,
            budget_expired,
        }
    }

    // Dead ends that every player can reach without going through the goal.
    fn reachable_dead_ends(
        grid: &Grid,
        starts: &[Position],
        goal: Position,
        dead_ends: &[Position],
    ) -> Vec<Position> {
        let mut checker: ReachabilityChecker = ReachabilityChecker::new(grid);
        let areas: Vec<HashSet<Position>> = starts
            .iter()
            .map(|s| checker.reachable_avoiding(*s, goal))
            .collect();

        dead_ends
            .iter()
            .filter(|d| areas.iter().all(|a| a.contains(d)))
            .copied()
            .collect()
    }

    // Open edge of the goal through which the player comes. In a perfect maze, locking that edge
    // blocks the only way to the goal.
    fn goal_lock_side(grid: &Grid, start: Position, goal: Position) -> Option<Direction> {
        let area: HashSet<Position> = ReachabilityChecker::new(grid).reachable_avoiding(start, goal);
        let open = |d: &&Direction| grid.edge(goal, **d) == EdgeState::Open;

        GOAL_LOCK_ORDER
            .iter()
            .filter(open)
            .find(|d| {
                grid.neighbor(goal, **d)
                    .is_some_and(|n| area.contains(&n))
            })
            .or_else(|| GOAL_LOCK_ORDER.iter().find(open))
            .copied()
    }

    fn all_reachable(grid: &Grid, starts: &[Position], targets: &[Position]) -> bool {
        let mut checker: ReachabilityChecker = ReachabilityChecker::new(grid);
        starts.iter().all(|s| checker.can_reach_all(*s, targets))
    }

    // Choose a dead end still reachable by every player, or any reachable cell otherwise.
    fn hazard_position(
        grid: &Grid,
        starts: &[Position],
        free_dead_ends: &[Position],
        rng: &mut RandomSource,
    ) -> Position {
        let mut checker: ReachabilityChecker = ReachabilityChecker::new(grid);
        let areas: Vec<HashSet<Position>> =
            starts.iter().map(|s| checker.reachable_from(*s)).collect();
        let reachable = |p: &Position| areas.iter().all(|a| a.contains(p));

        let dead_ends: Vec<Position> = free_dead_ends
            .iter()
            .filter(|p| reachable(p))
            .copied()
            .collect();
        if !dead_ends.is_empty() {
            return dead_ends[rng.below(dead_ends.len())];
        }

        let cells: Vec<Position> = grid.positions().filter(|p| reachable(p)).collect();
        if cells.is_empty() {
            starts[0]
        } else {
            cells[rng.below(cells.len())]
        }
    }
}

/// Number of key collectibles in the list.
pub fn count_keys(collectibles: &[Collectible]) -> usize {
    collectibles
        .iter()
        .filter(|c| c.kind == CollectibleKind::Key)
        .count()
}
