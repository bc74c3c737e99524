//! Procedural staircase
//!
//! The staircase is conceptually infinite. It is materialized in chunks:
//! an initial run on (re)start, then further chunks whenever the player
//! closes in on the tail. Visited stairs are kept so the camera can look back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::Direction;
use crate::consts::*;

/// One platform of the staircase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stair {
    /// World position of the stair's top face center
    pub pos: Vec2,
    /// Facing required to climb from this stair to the next one
    pub dir: Direction,
}

impl Stair {
    /// Position of the stair that follows this one
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + Vec2::new(self.dir.sign() * STEP_DX, -STEP_DY)
    }
}

/// Append-only staircase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StairField {
    stairs: Vec<Stair>,
}

impl StairField {
    /// Generate the opening run from the origin.
    ///
    /// The first few stairs always head right so a new player gets a free start.
    pub fn generate_initial<R: Rng>(rng: &mut R, flip_probability: f64) -> Self {
        let p = flip_probability.clamp(0.0, 1.0);
        let mut stairs = Vec::with_capacity(INITIAL_STAIRS + EXTEND_CHUNK);
        let mut pos = Vec2::ZERO;
        let mut dir = Direction::Right;

        for i in 0..INITIAL_STAIRS {
            if i > STRAIGHT_RUN && rng.random_bool(p) {
                dir = dir.flipped();
            }
            let stair = Stair { pos, dir };
            pos = stair.next_pos();
            stairs.push(stair);
        }

        Self { stairs }
    }

    /// Build a field from explicit step directions, starting at the origin
    #[cfg(test)]
    pub(crate) fn from_directions(dirs: &[Direction]) -> Self {
        let mut stairs = Vec::with_capacity(dirs.len());
        let mut pos = Vec2::ZERO;
        for &dir in dirs {
            let stair = Stair { pos, dir };
            pos = stair.next_pos();
            stairs.push(stair);
        }
        Self { stairs }
    }

    /// Append another chunk continuing from the tail
    pub fn extend<R: Rng>(&mut self, rng: &mut R, flip_probability: f64) {
        let Some(tail) = self.stairs.last().copied() else {
            *self = Self::generate_initial(rng, flip_probability);
            return;
        };

        let p = flip_probability.clamp(0.0, 1.0);
        let mut pos = tail.next_pos();
        let mut dir = tail.dir;

        for _ in 0..EXTEND_CHUNK {
            if rng.random_bool(p) {
                dir = dir.flipped();
            }
            let stair = Stair { pos, dir };
            pos = stair.next_pos();
            self.stairs.push(stair);
        }

        log::debug!("Staircase extended to {} stairs", self.stairs.len());
    }

    /// True once `index` is within the extension margin of the tail
    #[inline]
    pub fn needs_extension(&self, index: usize) -> bool {
        index + EXTEND_MARGIN > self.stairs.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Stair> {
        self.stairs.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stairs.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Stair] {
        &self.stairs
    }

    /// Stairs in `[center - behind, center + ahead)`, clamped to what exists
    pub fn window(&self, center: usize, behind: usize, ahead: usize) -> (usize, &[Stair]) {
        let start = center.saturating_sub(behind).min(self.stairs.len());
        let end = (center + ahead).min(self.stairs.len());
        (start, &self.stairs[start..end])
    }
}
