//! Particle bursts and screen shake
//!
//! Purely visual: nothing here feeds back into score, time or stairs.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

/// Player/particle colors by combo tier (0xRRGGBB), cycled every 10 combo
pub const COMBO_PALETTE: [u32; 7] = [
    0x3b82f6, // blue
    0x10b981, // emerald
    0xf59e0b, // amber
    0x8b5cf6, // violet
    0xec4899, // pink
    0x06b6d4, // cyan
    0xef4444, // red
];

/// Death burst color
pub const DEATH_COLOR: u32 = 0xef4444;

pub const COMBO_PARTICLES: usize = 30;
pub const COMBO_LIFE_MS: f32 = 800.0;
pub const DEATH_PARTICLES: usize = 40;
pub const DEATH_LIFE_MS: f32 = 1500.0;

/// Downward velocity gained per frame.
///
/// Applied once per frame regardless of frame time, so particle arcs depend on
/// the frame rate. Everything else in the simulation is scaled by dt.
pub const PARTICLE_GRAVITY: f32 = 0.5;

/// Color of the current combo tier
#[inline]
pub fn tier_color(combo: u32) -> u32 {
    COMBO_PALETTE[(combo / 10) as usize % COMBO_PALETTE.len()]
}

/// Celebrate a combo milestone at the player's position
pub fn combo_burst(state: &mut GameState) {
    state.shake = COMBO_SHAKE_MS;
    let color = tier_color(state.combo);
    spawn_burst(state, COMBO_PARTICLES, 15.0, 5.0, COMBO_LIFE_MS, color);
}

/// Scatter the player on death
pub fn death_burst(state: &mut GameState) {
    state.shake = DEATH_SHAKE_MS;
    spawn_burst(state, DEATH_PARTICLES, 20.0, 10.0, DEATH_LIFE_MS, DEATH_COLOR);
}

fn spawn_burst(
    state: &mut GameState,
    count: usize,
    spread: f32,
    lift: f32,
    life: f32,
    color: u32,
) {
    let origin = state.player.visual_pos - Vec2::new(0.0, PARTICLE_LIFT);
    state.particles.reserve(count);
    for _ in 0..count {
        let vx = (state.fx_rng.random::<f32>() - 0.5) * spread;
        let vy = (state.fx_rng.random::<f32>() - 0.5) * spread - lift;
        state.particles.push(Particle {
            pos: origin,
            vel: Vec2::new(vx, vy),
            life,
            max_life: life,
            color,
        });
    }
}

/// Advance particle physics by one frame and cull the expired ones
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life -= dt;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Count down the shake timer
#[inline]
pub fn decay_shake(shake: f32, dt: f32) -> f32 {
    (shake - dt).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(5, Tuning::default(), Vec2::new(800.0, 600.0), 0)
    }

    #[test]
    fn test_tier_color_wraps() {
        assert_eq!(tier_color(0), COMBO_PALETTE[0]);
        assert_eq!(tier_color(19), COMBO_PALETTE[1]);
        assert_eq!(tier_color(70), COMBO_PALETTE[0]);
    }

    #[test]
    fn test_combo_burst_spawns_upward_biased_particles() {
        let mut state = state();
        state.combo = 10;
        combo_burst(&mut state);

        assert_eq!(state.particles.len(), COMBO_PARTICLES);
        assert_eq!(state.shake, COMBO_SHAKE_MS);
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(0.0, -PARTICLE_LIFT));
            assert!(p.vel.x.abs() <= 7.5);
            assert!(p.vel.y <= 2.5 && p.vel.y >= -12.5);
            assert_eq!(p.color, COMBO_PALETTE[1]);
            assert_eq!(p.life, COMBO_LIFE_MS);
        }
    }

    #[test]
    fn test_death_burst_is_red_and_longer() {
        let mut state = state();
        death_burst(&mut state);
        assert_eq!(state.particles.len(), DEATH_PARTICLES);
        assert_eq!(state.shake, DEATH_SHAKE_MS);
        assert!(state.particles.iter().all(|p| p.color == DEATH_COLOR));
        assert!(state.particles.iter().all(|p| p.max_life == DEATH_LIFE_MS));
    }

    #[test]
    fn test_gravity_is_per_frame_not_per_ms() {
        let make = || Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 1000.0,
            max_life: 1000.0,
            color: 0,
        };
        let mut short = vec![make()];
        let mut long = vec![make()];
        update_particles(&mut short, 1.0);
        update_particles(&mut long, 50.0);
        assert_eq!(short[0].vel.y, long[0].vel.y);
        assert_eq!(short[0].vel.y, PARTICLE_GRAVITY);
        assert_eq!(long[0].life, 950.0);
    }

    #[test]
    fn test_expired_particles_are_culled() {
        let mut particles = vec![
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                life: 10.0,
                max_life: 800.0,
                color: 0,
            },
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                life: 500.0,
                max_life: 800.0,
                color: 0,
            },
        ];
        update_particles(&mut particles, 10.0);
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].life, 490.0);
    }

    #[test]
    fn test_shake_floors_at_zero() {
        assert_eq!(decay_shake(150.0, 16.0), 134.0);
        assert_eq!(decay_shake(10.0, 16.0), 0.0);
    }
}
