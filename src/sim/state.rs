//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::Direction;
use super::stairs::{Stair, StairField};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for the first press; the clock is frozen
    Start,
    /// Clock draining, presses climb or kill
    Playing,
    /// Run ended; only restart leaves this state
    GameOver,
}

/// The player's position on the staircase and its visual smoothing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stair the player stands on
    pub index: usize,
    pub facing: Direction,
    /// Eased world position drawn on screen
    pub visual_pos: Vec2,
    /// Upward hop pulse (px), decays to 0
    pub jump_offset: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            index: 0,
            facing: Direction::Right,
            visual_pos: Vec2::ZERO,
            jump_offset: 0.0,
        }
    }
}

/// Screen-space offset applied to world coordinates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub target: Vec2,
}

impl Camera {
    /// Offset that places `stair` at the camera anchor of the viewport
    #[inline]
    pub fn target_for(stair: &Stair, viewport: Vec2) -> Vec2 {
        Vec2::new(
            -stair.pos.x + viewport.x * CAMERA_ANCHOR_X,
            -stair.pos.y + viewport.y * CAMERA_ANCHOR_Y,
        )
    }

    /// Jump straight to the target without easing
    pub fn snap_to(&mut self, target: Vec2) {
        self.target = target;
        self.pos = target;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life (ms)
    pub life: f32,
    pub max_life: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Something the host should hear about, produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score-relevant state changed (climb, game over, restart)
    StateChanged,
    /// Remaining time as a percentage of the full budget
    TimeProgress(f32),
    /// A run ended with a score above the previous best
    NewHighScore(u32),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub run_state: RunState,
    pub score: u32,
    pub combo: u32,
    pub high_score: u32,
    /// Remaining time budget
    pub time: f32,
    pub stairs: StairField,
    pub player: Player,
    pub camera: Camera,
    /// Viewport size in CSS pixels, used for the camera anchor
    pub viewport: Vec2,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Remaining screen shake (ms)
    pub shake: f32,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    /// Drives stair generation
    pub(crate) stair_rng: Pcg32,
    /// Drives particle spread; kept apart so effects never shift the staircase
    pub(crate) fx_rng: Pcg32,
}

impl GameState {
    /// Create a fresh run in the Start state
    pub fn new(seed: u64, tuning: Tuning, viewport: Vec2, high_score: u32) -> Self {
        let mut stair_rng = Pcg32::seed_from_u64(seed);
        let stairs = StairField::generate_initial(&mut stair_rng, tuning.flip_probability);
        let mut state = Self {
            seed,
            run_state: RunState::Start,
            score: 0,
            combo: 0,
            high_score,
            time: tuning.max_time,
            player: Player::default(),
            camera: Camera::default(),
            viewport,
            particles: Vec::new(),
            shake: 0.0,
            events: Vec::new(),
            stairs,
            stair_rng,
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            tuning,
        };
        state.snap_to_player();
        state
    }

    /// Stair the player is standing on (and about to climb from)
    #[inline]
    pub fn current_stair(&self) -> Option<&Stair> {
        self.stairs.get(self.player.index)
    }

    /// Remaining time as 0-100
    #[inline]
    pub fn time_percent(&self) -> f32 {
        if self.tuning.max_time <= 0.0 {
            return 0.0;
        }
        (self.time / self.tuning.max_time * 100.0).clamp(0.0, 100.0)
    }

    /// Place camera and player visuals exactly on the current stair
    pub fn snap_to_player(&mut self) {
        if let Some(stair) = self.current_stair().copied() {
            self.player.visual_pos = stair.pos;
            self.camera.snap_to(Camera::target_for(&stair, self.viewport));
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Swap in a hand-built staircase and stand on its first stair
    #[cfg(test)]
    pub(crate) fn set_stairs(&mut self, stairs: StairField) {
        self.stairs = stairs;
        self.snap_to_player();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_at_origin() {
        let state = GameState::new(1, Tuning::default(), Vec2::new(800.0, 600.0), 12);
        assert_eq!(state.run_state, RunState::Start);
        assert_eq!(state.time, 100.0);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.player.visual_pos, Vec2::ZERO);
        assert!((state.camera.pos - Vec2::new(400.0, 420.0)).length() < 1e-3);
        assert_eq!(state.camera.pos, state.camera.target);
    }

    #[test]
    fn test_time_percent() {
        let mut state = GameState::new(1, Tuning::default(), Vec2::ZERO, 0);
        state.time = 25.0;
        assert_eq!(state.time_percent(), 25.0);
    }
}
