/*
settings.rs

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

//! User settings.
//!
//! The settings can be stored in a JSON file (see [`crate::saver::settings::SaverSettings`]).
//! Missing fields get their default value.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::agent::BotAlgorithm;
use crate::generator::maze::{MazeDimensions, MazeOptions};

/// Settings object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of players, including the bots.
    pub num_players: usize,

    /// Number of players controlled by a solver agent. The bots are the last players.
    pub num_bots: usize,

    /// Exploration strategy of the bots.
    pub bot_algorithm: BotAlgorithm,

    /// Minimum delay between two moves of a bot.
    pub bot_movement_delay_ms: u64,

    /// Time budget for placing the locks.
    pub lock_time_budget_ms: u64,

    /// Probability of placing a hazard in a new maze.
    pub hazard_chance: f64,

    /// Always place a hazard. For diagnostic purposes.
    pub always_place_hazard: bool,

    /// Mark the cells the players walk through.
    pub mark_trails: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_players: 1,
            num_bots: 0,
            bot_algorithm: BotAlgorithm::DepthFirstSearch,
            bot_movement_delay_ms: 300,
            lock_time_budget_ms: 6000,
            hazard_chance: 0.1,
            always_place_hazard: false,
            mark_trails: false,
        }
    }
}

impl Settings {
    /// Fix inconsistent values: there is at least one player, and no more bots than players.
    pub fn normalize(&mut self) {
        self.num_players = self.num_players.max(1);
        self.num_bots = self.num_bots.min(self.num_players);
        if self.hazard_chance.is_nan() {
            self.hazard_chance = 0.0;
        }
        self.hazard_chance = self.hazard_chance.clamp(0.0, 1.0);
    }

    pub fn bot_movement_delay(&self) -> Duration {
        Duration::from_millis(self.bot_movement_delay_ms)
    }

    pub fn lock_time_budget(&self) -> Duration {
        Duration::from_millis(self.lock_time_budget_ms)
    }

    /// Return the maze generation options.
    pub fn maze_options(&self, dimensions: Option<MazeDimensions>) -> MazeOptions {
        MazeOptions {
            num_players: self.num_players.max(1),
            dimensions,
            lock_time_budget: self.lock_time_budget(),
            hazard_chance: self.hazard_chance,
            always_place_hazard: self.always_place_hazard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"num_bots": 2, "mark_trails": true}"#).expect("Valid JSON");

        assert_eq!(s.num_bots, 2);
        assert!(s.mark_trails);
        assert_eq!(s.num_players, 1);
        assert_eq!(s.bot_algorithm, BotAlgorithm::DepthFirstSearch);
        assert_eq!(s.bot_movement_delay(), Duration::from_millis(300));
        assert_eq!(s.lock_time_budget(), Duration::from_secs(6));
    }

    #[test]
    fn test_bot_algorithm_name() {
        let s: Settings =
            serde_json::from_str(r#"{"bot_algorithm": "right-hand-rule"}"#).expect("Valid JSON");

        assert_eq!(s.bot_algorithm, BotAlgorithm::RightHandRule);
    }

    #[test]
    fn test_normalize() {
        let mut s: Settings = Settings {
            num_players: 0,
            num_bots: 3,
            hazard_chance: 4.0,
            ..Settings::default()
        };
        s.normalize();

        assert_eq!(s.num_players, 1);
        assert_eq!(s.num_bots, 1);
        assert_eq!(s.hazard_chance, 1.0);
    }

    #[test]
    fn test_maze_options() {
        let s: Settings = Settings {
            num_players: 3,
            always_place_hazard: true,
            ..Settings::default()
        };
        let o: MazeOptions = s.maze_options(Some(MazeDimensions { cols: 4, rows: 6 }));

        assert_eq!(o.num_players, 3);
        assert!(o.always_place_hazard);
        assert_eq!(o.dimensions, Some(MazeDimensions { cols: 4, rows: 6 }));
        assert_eq!(o.lock_time_budget, Duration::from_millis(6000));
    }
}
