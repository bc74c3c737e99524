//! Raw input mapping
//!
//! Keeps the browser event handlers thin: they read a key name or a touch
//! position and hand it here.

use crate::sim::Direction;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move(Direction),
    /// Start over (only honored after game over)
    Restart,
    /// Toggle demo mode
    ToggleAutopilot,
    /// Step to the next quality preset
    CycleQuality,
    /// Toggle reduced motion
    ToggleReducedMotion,
}

/// Map a `KeyboardEvent.key` value
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyCommand::Move(Direction::Left)),
        "ArrowRight" | "d" | "D" => Some(KeyCommand::Move(Direction::Right)),
        " " | "Enter" => Some(KeyCommand::Restart),
        "i" | "I" => Some(KeyCommand::ToggleAutopilot),
        "q" | "Q" => Some(KeyCommand::CycleQuality),
        "m" | "M" => Some(KeyCommand::ToggleReducedMotion),
        _ => None,
    }
}

/// Left half of the surface turns left, right half goes right
#[inline]
pub fn touch_direction(x: f32, width: f32) -> Direction {
    if x < width / 2.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// One direction per newly landed touch, in event order.
///
/// Fed from `changedTouches`; fingers already resting on the surface are not
/// part of the list and never press again.
pub fn touch_directions<I>(landed_x: I, width: f32) -> Vec<Direction>
where
    I: IntoIterator<Item = f32>,
{
    landed_x
        .into_iter()
        .map(|x| touch_direction(x, width))
        .collect()
}
