//! Decorative background stars
//!
//! Stars sit in screen space and never move with the camera. Their twinkle is
//! keyed to wall-clock time, not simulation time.

use glam::Vec2;
use rand::Rng;

use crate::consts::STAR_COUNT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
}

impl Star {
    /// Opacity at wall-clock `time_ms`
    #[inline]
    pub fn twinkle(&self, time_ms: f64) -> f32 {
        0.3 + ((time_ms * 0.001) as f32 + self.pos.x).sin() * 0.2
    }
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    /// Scatter stars uniformly over the viewport
    pub fn generate<R: Rng>(rng: &mut R, viewport: Vec2) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * viewport.x,
                    rng.random::<f32>() * viewport.y,
                ),
                size: rng.random::<f32>() * 2.0,
            })
            .collect();
        Self { stars }
    }
}
