//! Input handling and per-frame simulation
//!
//! Two entry points mutate a run: `handle_direction` for each press and
//! `step` once per rendered frame. Both record `GameEvent`s for the host.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::feedback;
use super::input::{Direction, resolve};
use super::stairs::StairField;
use super::state::{Camera, GameEvent, GameState, Player, RunState};
use crate::consts::*;
use crate::ease_toward;

/// What a single press did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Run already over; nothing changed
    Ignored,
    /// Stepped onto the next stair
    Climbed,
    /// Wrong way; the run ended
    Fell,
}

/// Apply one directional press
pub fn handle_direction(state: &mut GameState, requested: Direction) -> InputOutcome {
    if state.run_state == RunState::GameOver {
        return InputOutcome::Ignored;
    }

    if state.run_state == RunState::Start {
        state.run_state = RunState::Playing;
        log::info!("Run started (seed {})", state.seed);
    }

    let action = resolve(state.player.facing, requested);
    state.player.facing = action.apply(state.player.facing);

    let required = state.current_stair().map(|s| s.dir);
    if required != Some(state.player.facing) {
        game_over(state);
        return InputOutcome::Fell;
    }

    state.player.index += 1;
    state.score += 1;
    state.combo += 1;

    let refill = state.tuning.refill(state.score);
    state.time = (state.time + refill).min(state.tuning.max_time);
    state.player.jump_offset = JUMP_HEIGHT;

    let interval = state.tuning.combo_interval;
    if interval > 0 && state.combo.is_multiple_of(interval) {
        feedback::combo_burst(state);
    }

    if state.stairs.needs_extension(state.player.index) {
        let p = state.tuning.flip_probability;
        state.stairs.extend(&mut state.stair_rng, p);
    }

    state.events.push(GameEvent::StateChanged);
    InputOutcome::Climbed
}

/// Advance the run by one frame of `dt_ms` milliseconds
pub fn step(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms.clamp(0.0, MAX_FRAME_MS);

    if state.run_state == RunState::Playing {
        let drain = state.tuning.drain_rate(state.score) * (dt / 1000.0);
        state.time -= drain;
        if state.time <= 0.0 {
            state.time = 0.0;
            game_over(state);
        }
        state.events.push(GameEvent::TimeProgress(state.time_percent()));
    }

    if let Some(stair) = state.current_stair().copied() {
        state.camera.target = Camera::target_for(&stair, state.viewport);

        let visual = &mut state.player.visual_pos;
        visual.x = ease_toward(visual.x, stair.pos.x, dt, PLAYER_EASE);
        visual.y = ease_toward(visual.y, stair.pos.y, dt, PLAYER_EASE);
    }

    let camera = &mut state.camera;
    camera.pos.x = ease_toward(camera.pos.x, camera.target.x, dt, CAMERA_EASE);
    camera.pos.y = ease_toward(camera.pos.y, camera.target.y, dt, CAMERA_EASE);

    state.player.jump_offset *= (-dt * JUMP_DECAY).exp();
    state.shake = feedback::decay_shake(state.shake, dt);
    feedback::update_particles(&mut state.particles, dt);
}

/// End the run: record a new best, scatter the player, shake the screen
pub fn game_over(state: &mut GameState) {
    if state.run_state == RunState::GameOver {
        return;
    }
    state.run_state = RunState::GameOver;

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore(state.score));
        log::info!("New high score: {}", state.score);
    }

    feedback::death_burst(state);
    log::info!("Game over at score {} (combo {})", state.score, state.combo);
    state.events.push(GameEvent::StateChanged);
}

/// Reset to a fresh Start state with a new staircase
pub fn restart(state: &mut GameState, seed: u64) {
    state.seed = seed;
    state.stair_rng = Pcg32::seed_from_u64(seed);
    state.fx_rng = Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    state.run_state = RunState::Start;
    state.score = 0;
    state.combo = 0;
    state.time = state.tuning.max_time;
    state.player = Player::default();
    state.particles.clear();
    state.shake = 0.0;
    state.stairs = StairField::generate_initial(&mut state.stair_rng, state.tuning.flip_probability);
    state.snap_to_player();

    state.events.push(GameEvent::StateChanged);
    state.events.push(GameEvent::TimeProgress(100.0));
}

/// Press that climbs the upcoming stair (demo/idle mode)
pub fn autopilot_direction(state: &GameState) -> Direction {
    state
        .current_stair()
        .map(|s| s.dir)
        .unwrap_or(state.player.facing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::feedback::{COMBO_PARTICLES, DEATH_PARTICLES};
    use crate::sim::input::Direction::{Left, Right};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn state_with(dirs: &[Direction]) -> GameState {
        let mut state = GameState::new(12345, Tuning::default(), Vec2::new(800.0, 600.0), 0);
        state.set_stairs(StairField::from_directions(dirs));
        state
    }

    #[test]
    fn test_climb_right_onto_right_stair() {
        let mut state = state_with(&[Right; 100]);
        assert_eq!(handle_direction(&mut state, Right), InputOutcome::Climbed);
        assert_eq!(state.run_state, RunState::Playing);
        assert_eq!(state.player.index, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.player.jump_offset, JUMP_HEIGHT);
        assert_eq!(state.drain_events(), vec![GameEvent::StateChanged]);
    }

    #[test]
    fn test_mismatch_without_turn_ends_run() {
        let mut state = state_with(&[Left; 100]);
        assert_eq!(handle_direction(&mut state, Right), InputOutcome::Fell);
        assert_eq!(state.run_state, RunState::GameOver);
        assert_eq!(state.player.index, 0);
        assert_eq!(state.particles.len(), DEATH_PARTICLES);
        assert_eq!(state.shake, DEATH_SHAKE_MS);
    }

    #[test]
    fn test_turn_then_climb_left() {
        let mut state = state_with(&[Left; 100]);
        assert_eq!(handle_direction(&mut state, Left), InputOutcome::Climbed);
        assert_eq!(state.player.facing, Left);
        assert_eq!(state.player.index, 1);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_turn_into_mismatch_ends_run() {
        let mut state = state_with(&[Right; 100]);
        assert_eq!(handle_direction(&mut state, Left), InputOutcome::Fell);
        assert_eq!(state.player.facing, Left);
        assert_eq!(state.run_state, RunState::GameOver);
    }

    #[test]
    fn test_input_after_game_over_is_ignored() {
        let mut state = state_with(&[Left; 100]);
        handle_direction(&mut state, Right);
        state.drain_events();
        let particles = state.particles.len();

        for dir in [Left, Right, Left] {
            assert_eq!(handle_direction(&mut state, dir), InputOutcome::Ignored);
        }
        assert_eq!(state.run_state, RunState::GameOver);
        assert_eq!(state.player.index, 0);
        assert_eq!(state.player.facing, Right);
        assert_eq!(state.particles.len(), particles);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_time_refill_is_capped() {
        let mut state = state_with(&[Right; 100]);
        handle_direction(&mut state, Right);
        assert_eq!(state.time, 100.0);

        state.time = 50.0;
        handle_direction(&mut state, Right);
        // score is now 2: refill = 8 - 0.02
        assert!((state.time - 57.98).abs() < 1e-4);
    }

    #[test]
    fn test_combo_ten_bursts_eleven_does_not() {
        let mut state = state_with(&[Right; 100]);
        for _ in 0..9 {
            handle_direction(&mut state, Right);
        }
        assert!(state.particles.is_empty());

        handle_direction(&mut state, Right);
        assert_eq!(state.combo, 10);
        assert_eq!(state.particles.len(), COMBO_PARTICLES);
        assert_eq!(state.shake, COMBO_SHAKE_MS);

        handle_direction(&mut state, Right);
        assert_eq!(state.combo, 11);
        assert_eq!(state.particles.len(), COMBO_PARTICLES);
    }

    #[test]
    fn test_climbing_near_tail_extends_field() {
        let mut state = state_with(&[Right; 40]);
        for _ in 0..11 {
            assert_eq!(handle_direction(&mut state, Right), InputOutcome::Climbed);
        }
        assert_eq!(state.stairs.len(), 40 + EXTEND_CHUNK);
    }

    #[test]
    fn test_time_exhaustion_ends_run_at_zero() {
        let mut state = state_with(&[Right; 100]);
        handle_direction(&mut state, Right);
        state.drain_events();

        state.time = 0.01;
        step(&mut state, 16.0);

        assert_eq!(state.run_state, RunState::GameOver);
        assert_eq!(state.time, 0.0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::StateChanged));
        assert_eq!(events.last(), Some(&GameEvent::TimeProgress(0.0)));
    }

    #[test]
    fn test_time_exactly_zero_ends_run() {
        let mut state = state_with(&[Right; 100]);
        handle_direction(&mut state, Right);
        state.time = 0.0;
        step(&mut state, 0.0);
        assert_eq!(state.run_state, RunState::GameOver);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_clock_frozen_before_first_press() {
        let mut state = state_with(&[Right; 100]);
        for _ in 0..100 {
            step(&mut state, 16.0);
        }
        assert_eq!(state.time, 100.0);
        assert_eq!(state.run_state, RunState::Start);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_drain_uses_clamped_dt() {
        let mut state = state_with(&[Right; 100]);
        handle_direction(&mut state, Right);
        state.time = 50.0;
        // 1000ms of inactivity only counts as 50ms
        step(&mut state, 1000.0);
        let expected = 50.0 - (6.0 + 0.15) * 0.05;
        assert!((state.time - expected).abs() < 1e-4);
    }

    #[test]
    fn test_camera_and_player_ease_toward_stair() {
        let mut state = state_with(&[Right; 100]);
        handle_direction(&mut state, Right);
        let target = state.current_stair().unwrap().pos;
        let start_gap = (target - state.player.visual_pos).length();

        step(&mut state, 16.0);
        let gap = (target - state.player.visual_pos).length();
        assert!(gap < start_gap && gap > 0.0);
        assert!(state.player.jump_offset < JUMP_HEIGHT);

        for _ in 0..400 {
            step(&mut state, 16.0);
        }
        assert!((target - state.player.visual_pos).length() < 0.01);
        assert!((state.camera.pos - state.camera.target).length() < 0.01);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut state = state_with(&[Right, Right, Left, Left]);
        state.high_score = 1;
        handle_direction(&mut state, Right);
        handle_direction(&mut state, Right);
        handle_direction(&mut state, Right);

        assert_eq!(state.run_state, RunState::GameOver);
        assert_eq!(state.high_score, 2);
        assert!(state.events.contains(&GameEvent::NewHighScore(2)));
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = state_with(&[Right; 100]);
        for _ in 0..12 {
            handle_direction(&mut state, Right);
        }
        handle_direction(&mut state, Left);
        assert_eq!(state.run_state, RunState::GameOver);
        state.drain_events();

        restart(&mut state, 777);

        assert_eq!(state.run_state, RunState::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.time, 100.0);
        assert_eq!(state.player.index, 0);
        assert_eq!(state.player.facing, Right);
        assert_eq!(state.high_score, 12);
        assert!(state.particles.is_empty());
        assert_eq!(state.shake, 0.0);
        assert_eq!(state.stairs.len(), INITIAL_STAIRS);
        assert_eq!(state.stairs.get(0).unwrap().pos, Vec2::ZERO);
        assert_eq!(state.player.visual_pos, Vec2::ZERO);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::StateChanged, GameEvent::TimeProgress(100.0)]
        );
    }

    #[test]
    fn test_autopilot_climbs_generated_staircase() {
        let mut state = GameState::new(2024, Tuning::default(), Vec2::new(800.0, 600.0), 0);
        for _ in 0..500 {
            let dir = autopilot_direction(&state);
            assert_eq!(handle_direction(&mut state, dir), InputOutcome::Climbed);
            step(&mut state, 16.0);
        }
        assert_eq!(state.score, 500);
        assert!(state.stairs.len() > 500 + EXTEND_MARGIN);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::default(), Vec2::new(640.0, 480.0), 0);
        let mut b = GameState::new(99999, Tuning::default(), Vec2::new(640.0, 480.0), 0);
        for _ in 0..120 {
            let dir = autopilot_direction(&a);
            handle_direction(&mut a, dir);
            handle_direction(&mut b, dir);
            step(&mut a, 16.7);
            step(&mut b, 16.7);
        }
        assert_eq!(a.stairs.as_slice(), b.stairs.as_slice());
        assert_eq!(a.time, b.time);
        assert_eq!(a.particles.len(), b.particles.len());
    }

    proptest! {
        #[test]
        fn prop_high_score_never_decreases(
            runs in prop::collection::vec(0usize..40, 1..8),
        ) {
            let mut state = state_with(&[Right; 100]);
            let mut best = 0;
            for (i, climbs) in runs.into_iter().enumerate() {
                restart(&mut state, i as u64);
                state.set_stairs(StairField::from_directions(&[Right; 100]));
                for _ in 0..climbs {
                    handle_direction(&mut state, Right);
                }
                let before = state.high_score;
                handle_direction(&mut state, Left);
                prop_assert_eq!(state.run_state, RunState::GameOver);
                prop_assert!(state.high_score >= before);
                best = best.max(climbs as u32);
                prop_assert_eq!(state.high_score, best);
            }
        }
    }
}
