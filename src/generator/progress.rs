/*
progress.rs

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

//! Progress events sent while a maze is being generated.

use super::cell::Position;

/// Generation progress.
///
/// The events are passed to the progress callback of [`crate::generator::maze::Maze::generate`].
/// The lock placement, which can run for several seconds, sends an event after every attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationProgress {
    /// The maze has been carved.
    Carved {
        cols: usize,
        rows: usize,
        goal: Position,
    },

    /// A lock placement attempt has been made.
    LockAttempt {
        attempt: usize,
        placed: usize,
        desired: usize,
    },

    /// The maze is ready.
    Finished { locks: usize, collectibles: usize },
}
