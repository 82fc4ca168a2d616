/*
reachability.rs

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

//! Check whether cells can be reached from other cells.
//!
//! Only open edges are followed: walls, locks, and the border all block the way.

use std::collections::HashSet;

use super::cell::Position;
use super::grid::Grid;

/// [`ReachabilityChecker`] object.
pub struct ReachabilityChecker<'a> {
    grid: &'a Grid,

    /// Cells visited during the current flood fill. The set is reset for every fill.
    visited: HashSet<Position>,

    /// Number of flood fills run so far.
    pub floods: usize,
}

impl<'a> ReachabilityChecker<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            visited: HashSet::with_capacity(grid.len()),
            floods: 0,
        }
    }

    /// Whether `to` can be reached from `from`.
    pub fn can_reach(&mut self, from: Position, to: Position) -> bool {
        self.flood(from, None, Some(to))
    }

    /// Whether every target can be reached from `from`.
    ///
    /// The method stops at the first target that cannot be reached.
    pub fn can_reach_all(&mut self, from: Position, targets: &[Position]) -> bool {
        targets.iter().all(|t| self.can_reach(from, *t))
    }

    /// Return all the cells that can be reached from `from`, including `from`.
    pub fn reachable_from(&mut self, from: Position) -> HashSet<Position> {
        self.flood(from, None, None);
        std::mem::take(&mut self.visited)
    }

    /// Return all the cells that can be reached from `from` without going through `avoid`.
    ///
    /// If `from` and `avoid` are the same cell, then the returned set is empty.
    pub fn reachable_avoiding(&mut self, from: Position, avoid: Position) -> HashSet<Position> {
        if from == avoid {
            return HashSet::new();
        }
        self.flood(from, Some(avoid), None);
        std::mem::take(&mut self.visited)
    }

    // Depth-first flood fill from `from`. Return `true` as soon as `target` is found.
    // When no target is given, the whole reachable area is explored and stays in `self.visited`.
    fn flood(&mut self, from: Position, avoid: Option<Position>, target: Option<Position>) -> bool {
        self.floods += 1;
        self.visited.clear();

        let mut stack: Vec<Position> = vec![from];
        self.visited.insert(from);
        if let Some(a) = avoid {
            self.visited.insert(a);
        }

        let mut found: bool = false;
        while let Some(pos) = stack.pop() {
            if Some(pos) == target {
                found = true;
                break;
            }
            for n in self.grid.open_neighbors(pos) {
                if self.visited.insert(n) {
                    stack.push(n);
                }
            }
        }

        if let Some(a) = avoid {
            self.visited.remove(&a);
        }
        if target.is_some() {
            self.visited.clear();
        }
        found
    }
}

/// Whether `to` can be reached from `from` in the given grid.
pub fn can_reach(grid: &Grid, from: Position, to: Position) -> bool {
    ReachabilityChecker::new(grid).can_reach(from, to)
}

/// Whether every target can be reached from `from` in the given grid.
pub fn can_reach_all(grid: &Grid, from: Position, targets: &[Position]) -> bool {
    ReachabilityChecker::new(grid).can_reach_all(from, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::cell::{Direction, EdgeState};

    // 3x1 corridor with a lock between the two last cells.
    fn corridor() -> Grid {
        let mut grid: Grid = Grid::new(3, 1);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Open);
        grid.set_edge(Position::new(1, 0), Direction::Right, EdgeState::Locked);
        grid.add_border();
        grid.mirror_edges();
        grid
    }

    #[test]
    fn test_can_reach() {
        let grid: Grid = corridor();
        let a: Position = Position::new(0, 0);
        let b: Position = Position::new(1, 0);
        let c: Position = Position::new(2, 0);

        assert!(can_reach(&grid, a, a));
        assert!(can_reach(&grid, a, b));
        assert!(can_reach(&grid, b, a));
        assert!(!can_reach(&grid, a, c));
        assert!(!can_reach(&grid, c, b));
    }

    #[test]
    fn test_can_reach_all_short_circuits() {
        let grid: Grid = corridor();
        let mut checker: ReachabilityChecker = ReachabilityChecker::new(&grid);
        let a: Position = Position::new(0, 0);

        assert!(checker.can_reach_all(a, &[]));
        assert!(checker.can_reach_all(a, &[a, Position::new(1, 0)]));
        let floods: usize = checker.floods;

        assert!(!checker.can_reach_all(
            a,
            &[Position::new(2, 0), Position::new(1, 0), Position::new(0, 0)]
        ));
        assert_eq!(checker.floods, floods + 1);
    }

    #[test]
    fn test_unlocked() {
        let mut grid: Grid = corridor();
        grid.remove_locks();

        assert!(can_reach_all(
            &grid,
            Position::new(2, 0),
            &[Position::new(0, 0), Position::new(1, 0)]
        ));
    }

    #[test]
    fn test_reachable_sets() {
        let mut grid: Grid = Grid::new(3, 1);
        grid.set_edge(Position::new(0, 0), Direction::Right, EdgeState::Open);
        grid.set_edge(Position::new(1, 0), Direction::Right, EdgeState::Open);
        grid.add_border();
        let mut checker: ReachabilityChecker = ReachabilityChecker::new(&grid);

        assert_eq!(checker.reachable_from(Position::new(0, 0)).len(), 3);

        let avoiding: HashSet<Position> =
            checker.reachable_avoiding(Position::new(0, 0), Position::new(1, 0));
        assert_eq!(avoiding, HashSet::from([Position::new(0, 0)]));
        assert!(
            checker
                .reachable_avoiding(Position::new(1, 0), Position::new(1, 0))
                .is_empty()
        );
    }

    #[test]
    fn test_visited_flags_untouched() {
        let grid: Grid = corridor();
        can_reach(&grid, Position::new(0, 0), Position::new(2, 0));

        assert!(grid.positions().all(|p| !grid.cell(p).visited));
    }
}
