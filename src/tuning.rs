//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here so a run can be replayed or
//! rebalanced without touching the simulation code.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::error::EngineError;

/// Time-pressure and generation parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Full time budget (also the starting budget)
    pub max_time: f32,
    /// Budget drained per second at score 0
    pub base_drain: f32,
    /// Extra drain per second for each point scored
    pub score_drain: f32,
    /// Budget restored by a climb at score 0
    pub refill_base: f32,
    /// Refill shrinks by this much per point scored
    pub refill_decay: f32,
    /// Refill never drops below this
    pub refill_min: f32,
    /// Chance that the staircase changes direction at each stair
    pub flip_probability: f64,
    /// Combo interval that triggers a feedback burst
    pub combo_interval: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_time: 100.0,
            base_drain: 6.0,
            score_drain: 0.15,
            refill_base: 8.0,
            refill_decay: 0.01,
            refill_min: 2.0,
            flip_probability: 0.4,
            combo_interval: 10,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning overrides from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Time budget drained per second at the given score
    pub fn drain_rate(&self, score: u32) -> f32 {
        self.base_drain + score as f32 * self.score_drain
    }

    /// Time budget restored by a climb that brought the score to `score`
    pub fn refill(&self, score: u32) -> f32 {
        (self.refill_base - score as f32 * self.refill_decay).max(self.refill_min)
    }
}
