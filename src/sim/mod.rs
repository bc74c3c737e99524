//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time advances only through `step(dt)`
//! - No rendering or platform dependencies

pub mod feedback;
pub mod input;
pub mod stairs;
pub mod state;
pub mod tick;

pub use feedback::{COMBO_PALETTE, DEATH_COLOR, tier_color};
pub use input::{Action, Direction, resolve};
pub use stairs::{Stair, StairField};
pub use state::{Camera, GameEvent, GameState, Particle, Player, RunState};
pub use tick::{InputOutcome, autopilot_direction, game_over, handle_direction, restart, step};
