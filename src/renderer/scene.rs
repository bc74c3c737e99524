//! Scene painting
//!
//! Turns the current game state into painter calls. Read-only: the only
//! inputs besides state are wall-clock time (star twinkle) and settings.
//!
//! Layers, back to front:
//! 1. sky gradient and stars (never shaken)
//! 2. stairs around the player, player, particles (shaken together)

use glam::Vec2;

use super::painter::{Color, Painter, hex, with_alpha};
use super::starfield::Starfield;
use super::vertex::colors;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Direction, GameState, RunState, tier_color};

/// Everything needed to paint one frame
pub struct Frame<'a> {
    pub state: &'a GameState,
    pub stars: &'a Starfield,
    pub settings: &'a Settings,
    /// Wall-clock time (ms); decorative only
    pub time_ms: f64,
}

/// Paint a full frame
pub fn draw_scene<P: Painter + ?Sized>(painter: &mut P, frame: &Frame) {
    let state = frame.state;

    draw_background(painter, state.viewport);
    draw_stars(painter, frame);

    let offset = state.camera.pos + shake_offset(frame);

    let (start, stairs) = state
        .stairs
        .window(state.player.index, DRAW_BEHIND, DRAW_AHEAD);
    let glow = frame.settings.quality.glow_enabled();
    for (i, stair) in stairs.iter().enumerate() {
        let current = start + i == state.player.index;
        draw_stair(painter, stair.pos + offset, current, glow);
    }

    if player_visible(state) {
        let feet = state.player.visual_pos + offset - Vec2::new(0.0, state.player.jump_offset);
        let color = hex(tier_color(state.combo), 1.0);
        draw_player(painter, feet, state.player.facing, color, glow);
    }

    let max_particles = frame.settings.max_particles();
    for particle in state.particles.iter().take(max_particles) {
        let alpha = (particle.life / particle.max_life).max(0.0);
        painter.fill_circle(
            particle.pos + offset,
            PARTICLE_RADIUS,
            hex(particle.color, alpha),
        );
    }
}

/// The player lingers briefly after death, then vanishes
#[inline]
pub fn player_visible(state: &GameState) -> bool {
    state.run_state != RunState::GameOver || state.shake > DEATH_HIDE_MS
}

/// Random jitter scaled by the remaining shake
pub fn shake_offset(frame: &Frame) -> Vec2 {
    let shake = frame.state.shake;
    if shake <= 0.0 || !frame.settings.effective_screen_shake() {
        return Vec2::ZERO;
    }
    let intensity = shake / DEATH_SHAKE_MS * SHAKE_INTENSITY;
    Vec2::new(
        jitter(frame.time_ms, 0) * intensity,
        jitter(frame.time_ms, 1) * intensity,
    )
}

/// Hash-based noise in [-0.5, 0.5)
fn jitter(time_ms: f64, salt: u32) -> f32 {
    let hash = (time_ms.to_bits() as u32 ^ (time_ms.to_bits() >> 32) as u32)
        .wrapping_mul(2654435761)
        .wrapping_add(salt.wrapping_mul(7919))
        .wrapping_mul(2246822519);
    ((hash >> 8) % 1000) as f32 / 1000.0 - 0.5
}

fn draw_background<P: Painter + ?Sized>(painter: &mut P, viewport: Vec2) {
    painter.fill_vertical_gradient(
        Vec2::ZERO,
        viewport,
        hex(colors::SKY_TOP, 1.0),
        hex(colors::SKY_BOTTOM, 1.0),
    );
}

fn draw_stars<P: Painter + ?Sized>(painter: &mut P, frame: &Frame) {
    let visible = frame.settings.visible_stars(frame.stars.stars.len());
    let twinkle = frame.settings.effective_twinkle();
    for star in frame.stars.stars.iter().take(visible) {
        let alpha = if twinkle { star.twinkle(frame.time_ms) } else { 0.3 };
        painter.fill_rect(star.pos, Vec2::splat(star.size), hex(colors::STAR, alpha));
    }
}

/// Isometric stair: diamond top with two shaded side faces
fn draw_stair<P: Painter + ?Sized>(painter: &mut P, at: Vec2, current: bool, glow: bool) {
    let (top, border, right, left) = if current {
        (
            colors::CURRENT_TOP,
            colors::CURRENT_BORDER,
            colors::CURRENT_RIGHT,
            colors::CURRENT_LEFT,
        )
    } else {
        (
            colors::STAIR_TOP,
            colors::STAIR_BORDER,
            colors::STAIR_RIGHT,
            colors::STAIR_LEFT,
        )
    };
    let border = hex(border, 1.0);

    let hw = ISO_W / 2.0;
    let hh = ISO_H / 2.0;
    let north = at - Vec2::new(0.0, hh);
    let east = at + Vec2::new(hw, 0.0);
    let south = at + Vec2::new(0.0, hh);
    let west = at - Vec2::new(hw, 0.0);
    let drop = Vec2::new(0.0, STAIR_THICKNESS);

    if current && glow {
        let halo = [
            north - Vec2::new(0.0, 6.0),
            east + Vec2::new(10.0, 0.0),
            south + Vec2::new(0.0, 6.0),
            west - Vec2::new(10.0, 0.0),
        ];
        painter.fill_quad(halo, hex(top, 0.3));
    }

    let diamond = [north, east, south, west];
    painter.fill_quad(diamond, hex(top, 1.0));
    painter.stroke_polygon(&diamond, 2.0, border);

    let right_face = [east, south, south + drop, east + drop];
    painter.fill_quad(right_face, hex(right, 1.0));
    painter.stroke_polygon(&right_face, 2.0, border);

    let left_face = [west, south, south + drop, west + drop];
    painter.fill_quad(left_face, hex(left, 1.0));
    painter.stroke_polygon(&left_face, 2.0, border);
}

/// Rounded body standing on `feet`, eye on the facing side, ground shadow
fn draw_player<P: Painter + ?Sized>(
    painter: &mut P,
    feet: Vec2,
    facing: Direction,
    color: Color,
    glow: bool,
) {
    let size = Vec2::new(PLAYER_W, PLAYER_H);
    let min = feet - Vec2::new(PLAYER_W / 2.0, PLAYER_H);

    if glow {
        let pad = Vec2::splat(6.0);
        let halo = with_alpha(color, 0.3);
        if !painter.fill_round_rect(min - pad, size + pad * 2.0, PLAYER_CORNER + 6.0, halo) {
            painter.fill_rect(min - pad, size + pad * 2.0, halo);
        }
    }

    if !painter.fill_round_rect(min, size, PLAYER_CORNER, color) {
        painter.fill_rect(min, size, color);
    }

    // face band
    painter.fill_rect(
        min + Vec2::splat(4.0),
        Vec2::new(PLAYER_W - 8.0, 16.0),
        hex(colors::FACE, 0.1),
    );

    let (eye_x, pupil_x) = match facing {
        Direction::Right => (6.0, 4.0),
        Direction::Left => (-14.0, 0.0),
    };
    let eye = Vec2::new(feet.x + eye_x, min.y + 10.0);
    painter.fill_rect(eye, Vec2::splat(8.0), hex(colors::EYE, 1.0));
    painter.fill_rect(
        Vec2::new(eye.x + pupil_x, min.y + 12.0),
        Vec2::splat(4.0),
        hex(colors::PUPIL, 1.0),
    );

    painter.fill_ellipse(
        feet + Vec2::new(0.0, 2.0),
        Vec2::new(14.0, 6.0),
        hex(colors::SHADOW, 0.4),
    );
}
