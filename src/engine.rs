//! Engine facade
//!
//! Owns the game state, the star field and the high-score store. The host
//! drives it: input calls go straight through to the simulation, and once per
//! animation frame the host calls `frame(now)` followed by `render(..)`.
//! Everything the host needs to hear about is delivered through an
//! `EngineListener` as events are drained after each mutation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::HighScoreStore;
use crate::renderer::{Frame, Painter, Starfield, draw_scene};
use crate::settings::Settings;
use crate::sim::{
    Camera, Direction, GameEvent, GameState, InputOutcome, RunState, autopilot_direction,
    handle_direction, restart, step,
};
use crate::tuning::Tuning;

/// Autopilot presses at most once per this many ms
pub const AUTOPILOT_INTERVAL_MS: f32 = 120.0;

/// Snapshot sent to the host whenever the score-relevant state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StateUpdate {
    pub run_state: RunState,
    pub score: u32,
    pub high_score: u32,
    pub combo: u32,
}

/// Host-side callbacks. Both default to doing nothing.
pub trait EngineListener {
    /// Climb, game over, restart
    fn on_state_change(&mut self, _update: &StateUpdate) {}
    /// Remaining time, 0-100. Every playing frame and once at restart.
    fn on_time_update(&mut self, _percent: f32) {}
}

pub struct Engine<S: HighScoreStore> {
    state: GameState,
    stars: Starfield,
    settings: Settings,
    store: S,
    listener: Box<dyn EngineListener>,
    /// Seeds each run and scatters the stars
    seed_rng: Pcg32,
    last_frame_ms: Option<f64>,
    autopilot: bool,
    autopilot_wait: f32,
    destroyed: bool,
}

impl<S: HighScoreStore> Engine<S> {
    /// Create an engine and start the first run.
    ///
    /// The listener immediately receives the initial state and a full time bar.
    pub fn new(
        store: S,
        listener: Box<dyn EngineListener>,
        viewport: Vec2,
        seed: u64,
        tuning: Tuning,
        settings: Settings,
    ) -> Self {
        let high_score = store.load().unwrap_or(0);
        log::info!("Engine created (seed {}, high score {})", seed, high_score);

        let mut seed_rng = Pcg32::seed_from_u64(seed);
        let run_seed = seed_rng.random();
        let mut state = GameState::new(run_seed, tuning, viewport, high_score);
        let stars = Starfield::generate(&mut seed_rng, viewport);
        state.events.push(GameEvent::StateChanged);
        state.events.push(GameEvent::TimeProgress(state.time_percent()));

        let mut engine = Self {
            state,
            stars,
            settings,
            store,
            listener,
            seed_rng,
            last_frame_ms: None,
            autopilot: false,
            autopilot_wait: 0.0,
            destroyed: false,
        };
        engine.dispatch();
        engine
    }

    /// Apply a left/right press
    pub fn handle_direction(&mut self, dir: Direction) -> InputOutcome {
        if self.destroyed {
            return InputOutcome::Ignored;
        }
        let outcome = handle_direction(&mut self.state, dir);
        self.dispatch();
        outcome
    }

    /// Start over from a fresh staircase and star field
    pub fn restart(&mut self) {
        if self.destroyed {
            return;
        }
        let seed = self.seed_rng.random();
        restart(&mut self.state, seed);
        self.stars = Starfield::generate(&mut self.seed_rng, self.state.viewport);
        self.autopilot_wait = 0.0;
        log::info!("Restarted (seed {})", seed);
        self.dispatch();
    }

    /// Stop all further mutation. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        log::info!("Engine destroyed at score {}", self.state.score);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Advance to wall-clock `now_ms`. The first frame only records the time.
    pub fn frame(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        if self.autopilot && self.state.run_state != RunState::GameOver {
            self.autopilot_wait -= dt;
            if self.autopilot_wait <= 0.0 {
                self.autopilot_wait = AUTOPILOT_INTERVAL_MS;
                let dir = autopilot_direction(&self.state);
                handle_direction(&mut self.state, dir);
            }
        }

        step(&mut self.state, dt);
        self.dispatch();
    }

    /// New viewport size in CSS pixels; the camera jumps to the current stair
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.destroyed {
            return;
        }
        self.state.viewport = Vec2::new(width, height);
        if let Some(stair) = self.state.current_stair().copied() {
            self.state
                .camera
                .snap_to(Camera::target_for(&stair, self.state.viewport));
        }
        log::debug!("Resized to {}x{}", width, height);
    }

    /// Paint the current frame. `time_ms` drives decoration only.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P, time_ms: f64) {
        let frame = Frame {
            state: &self.state,
            stars: &self.stars,
            settings: &self.settings,
            time_ms,
        };
        draw_scene(painter, &frame);
    }

    /// Toggle demo mode; returns the new setting
    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot_wait = 0.0;
        log::info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
        self.autopilot
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stars(&self) -> &Starfield {
        &self.stars
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current host-facing snapshot
    pub fn snapshot(&self) -> StateUpdate {
        StateUpdate {
            run_state: self.state.run_state,
            score: self.state.score,
            high_score: self.state.high_score,
            combo: self.state.combo,
        }
    }

    /// Deliver pending simulation events to the listener and store
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::StateChanged => {
                    let update = self.snapshot();
                    self.listener.on_state_change(&update);
                }
                GameEvent::TimeProgress(percent) => self.listener.on_time_update(percent),
                GameEvent::NewHighScore(score) => self.store.save(score),
            }
        }
    }
}
