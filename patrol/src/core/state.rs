//! Value types for agent position and facing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::direction::Direction;
use crate::core::grid::Grid;

/// Integer grid coordinate. Signed so off-grid neighbours are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step toward `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.forward_vector();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position plus facing; the key of the simulator's seen-state set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentState {
    pub position: Position,
    pub direction: Direction,
}

impl AgentState {
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// Initial state for `grid`: its start marker, facing up.
    pub fn start(grid: &Grid) -> Self {
        Self::new(grid.start(), Direction::Up)
    }

    /// Same position, rotated clockwise.
    pub fn turned(self) -> Self {
        Self::new(self.position, self.direction.rotate_clockwise())
    }

    /// Coordinate directly ahead.
    pub fn ahead(self) -> Position {
        self.position.step(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn step_moves_one_cell() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up), Position::new(0, -1));
        assert_eq!(origin.step(Direction::Right), Position::new(1, 0));
    }

    #[test]
    fn states_differing_only_by_direction_are_distinct_keys() {
        let pos = Position::new(2, 3);
        let mut seen = HashSet::new();
        for dir in Direction::ALL {
            assert!(seen.insert(AgentState::new(pos, dir)));
        }
        assert!(!seen.insert(AgentState::new(pos, Direction::Up)));
    }

    #[test]
    fn turned_keeps_position() {
        let state = AgentState::new(Position::new(4, 4), Direction::Left);
        let turned = state.turned();
        assert_eq!(turned.position, state.position);
        assert_eq!(turned.direction, Direction::Up);
    }
}
