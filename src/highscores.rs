//! Best-score persistence
//!
//! The engine only ever needs one number. It reaches storage through the
//! `HighScoreStore` port so the simulation never touches the environment.

use std::cell::Cell;
use std::rc::Rc;

/// Persistent scalar high-score storage
pub trait HighScoreStore {
    /// Stored best score, `None` when absent or unreadable
    fn load(&self) -> Option<u32>;
    /// Persist a new best score
    fn save(&mut self, score: u32);
}

/// In-memory store (native builds and tests).
///
/// Clones share the same cell, so a test can keep a handle and observe saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u32>>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a best score
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        store.value.set(Some(score));
        store
    }

    /// Number of saves performed
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Option<u32> {
        self.value.get()
    }

    fn save(&mut self, score: u32) {
        self.value.set(Some(score));
        self.writes.set(self.writes.get() + 1);
    }
}

/// Parse a stored high score, treating garbage as absent
pub fn parse_score(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(score) => Some(score),
        Err(_) => {
            log::warn!("Ignoring unreadable high score {:?}", raw);
            None
        }
    }
}
