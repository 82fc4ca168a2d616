/*
collectible.rs

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

//! Objects that players can pick up in the maze.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell::Position;

/// Type of the collectible objects.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    /// A key is consumed when a player reaches it. When all the keys are collected, all the locks
    /// open.
    Key,

    /// A hazard (acid) is kept by the first player who reaches it. The holder can dissolve one
    /// wall next to them.
    Hazard,
}

impl fmt::Display for CollectibleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectibleKind::Key => write!(f, "key"),
            CollectibleKind::Hazard => write!(f, "hazard"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub position: Position,
}

impl Collectible {
    pub fn key(position: Position) -> Self {
        Self {
            kind: CollectibleKind::Key,
            position,
        }
    }

    pub fn hazard(position: Position) -> Self {
        Self {
            kind: CollectibleKind::Hazard,
            position,
        }
    }

    pub fn is_key(&self) -> bool {
        self.kind == CollectibleKind::Key
    }
}

impl fmt::Display for Collectible {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}
