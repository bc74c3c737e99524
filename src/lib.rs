//! Sky Stairs - an endless isometric staircase reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stairs, input rules, clock, particles)
//! - `engine`: Facade that owns the simulation and talks to the host
//! - `renderer`: Scene painting and the WebGPU mesh pipeline
//! - `platform`: Browser input/storage/frame-loop glue
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, EngineListener, StateUpdate};
pub use error::EngineError;
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::{QualityPreset, Settings};
pub use sim::{Direction, RunState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Horizontal distance between consecutive stairs
    pub const STEP_DX: f32 = 40.0;
    /// Vertical rise between consecutive stairs (screen y grows downward)
    pub const STEP_DY: f32 = 24.0;

    /// Stairs materialized on (re)start
    pub const INITIAL_STAIRS: usize = 100;
    /// Stairs appended per extension
    pub const EXTEND_CHUNK: usize = 50;
    /// Extend once the player is this close to the tail
    pub const EXTEND_MARGIN: usize = 30;
    /// Stairs before the first possible direction flip
    pub const STRAIGHT_RUN: usize = 5;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_MS: f32 = 50.0;

    /// Easing rates (per ms)
    pub const CAMERA_EASE: f32 = 0.01;
    pub const PLAYER_EASE: f32 = 0.02;
    pub const JUMP_DECAY: f32 = 0.01;
    /// Jump pulse applied on every successful climb (px)
    pub const JUMP_HEIGHT: f32 = 20.0;

    /// Camera anchor as a fraction of the viewport
    pub const CAMERA_ANCHOR_X: f32 = 0.5;
    pub const CAMERA_ANCHOR_Y: f32 = 0.7;

    /// Screen shake durations (ms)
    pub const COMBO_SHAKE_MS: f32 = 150.0;
    pub const DEATH_SHAKE_MS: f32 = 400.0;
    /// Player stays visible after death until shake drops to this (ms)
    pub const DEATH_HIDE_MS: f32 = 200.0;
    /// Peak shake jitter (px)
    pub const SHAKE_INTENSITY: f32 = 15.0;

    /// Stairs drawn behind / ahead of the player
    pub const DRAW_BEHIND: usize = 15;
    pub const DRAW_AHEAD: usize = 30;

    /// Isometric stair diamond
    pub const ISO_W: f32 = 80.0;
    pub const ISO_H: f32 = 40.0;
    pub const STAIR_THICKNESS: f32 = 12.0;

    /// Player body
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 42.0;
    pub const PLAYER_CORNER: f32 = 10.0;

    /// Particle draw radius
    pub const PARTICLE_RADIUS: f32 = 4.0;
    /// Particles spawn this far above the player's feet
    pub const PARTICLE_LIFT: f32 = 20.0;

    /// Stars scattered on (re)start
    pub const STAR_COUNT: usize = 100;
}

/// Exponential approach of `value` toward `target` over `dt` ms at `rate` per ms.
///
/// Frame-rate independent: two steps of `dt` land where one step of `2 * dt` does.
#[inline]
pub fn ease_toward(value: f32, target: f32, dt: f32, rate: f32) -> f32 {
    value + (target - value) * (1.0 - (-dt * rate).exp())
}
