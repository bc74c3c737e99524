//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard and touch to directions)
//! - Storage (LocalStorage on web)
//! - The animation-frame loop and its teardown

pub mod input;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{KeyCommand, key_command, touch_direction, touch_directions};
pub use storage::HIGH_SCORE_KEY;
