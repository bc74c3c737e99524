//! Directional input classification
//!
//! The player only ever presses LEFT or RIGHT. Whether that press means
//! "keep climbing" or "turn around" depends on which way the player faces.

use serde::{Deserialize, Serialize};

/// Horizontal direction of a stair step or of the player's facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Horizontal sign: -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What a directional press asks the player to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pressed the way we already face
    Climb,
    /// Pressed the opposite way: flip, then try the next stair
    Turn,
}

impl Action {
    /// Facing after the action has been applied
    #[inline]
    pub fn apply(self, facing: Direction) -> Direction {
        match self {
            Action::Climb => facing,
            Action::Turn => facing.flipped(),
        }
    }
}

/// Classify a press given the current facing
#[inline]
pub fn resolve(facing: Direction, requested: Direction) -> Action {
    if facing == requested {
        Action::Climb
    } else {
        Action::Turn
    }
}
