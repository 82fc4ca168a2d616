/*
random.rs

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

//! Deterministic random source.
//!
//! A maze is a pure function of one integer seed: every random decision taken while building it
//! is drawn, in a fixed order, from a single [`RandomSource`] created from that seed.
//! Solver agents get their own [`RandomSource`] (see [`RandomSource::derive`]) so that adding a
//! bot never changes the maze.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Mixing constant used to derive independent streams from the same seed.
const STREAM_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded random number generator.
#[derive(Debug, Clone)]
pub struct RandomSource {
    /// Seed the generator was created from.
    seed: u64,

    rng: StdRng,
}

impl RandomSource {
    /// Create a [`RandomSource`] object from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return a fresh, non-deterministic seed for a new maze.
    pub fn random_seed() -> u64 {
        rand::rng().random()
    }

    /// Return the seed that was used to create the object.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent [`RandomSource`] for the given stream number.
    ///
    /// The derived source only depends on the seed and on `stream`, not on how many values have
    /// already been drawn from `self`.
    pub fn derive(&self, stream: u64) -> Self {
        Self::new(
            self.seed
                .wrapping_add(STREAM_MIX.wrapping_mul(stream.wrapping_add(1))),
        )
    }

    /// Return a uniformly distributed integer in `0..bound`.
    pub fn below(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "Cannot draw a random number below zero");
        self.rng.random_range(0..bound)
    }

    /// Return `true` with the given probability.
    ///
    /// Values outside of `0.0..=1.0` are clamped. `NaN` never succeeds.
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}
