//! LocalStorage-backed high score

/// LocalStorage key for the best score
pub const HIGH_SCORE_KEY: &str = "infinite_stairs_highscore";

#[cfg(target_arch = "wasm32")]
pub use web_store::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web_store {
    use super::HIGH_SCORE_KEY;
    use crate::error::EngineError;
    use crate::highscores::{HighScoreStore, parse_score};

    /// High score in `window.localStorage`. Degrades to "no score" when
    /// storage is blocked.
    pub struct LocalStorageStore {
        storage: Option<web_sys::Storage>,
    }

    impl LocalStorageStore {
        pub fn new() -> Self {
            let storage = match open() {
                Ok(storage) => Some(storage),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            };
            Self { storage }
        }
    }

    impl Default for LocalStorageStore {
        fn default() -> Self {
            Self::new()
        }
    }

    fn open() -> Result<web_sys::Storage, EngineError> {
        let window = web_sys::window().ok_or(EngineError::MissingHost("window"))?;
        window
            .local_storage()
            .map_err(|e| EngineError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| EngineError::Storage("localStorage disabled".into()))
    }

    impl HighScoreStore for LocalStorageStore {
        fn load(&self) -> Option<u32> {
            let raw = self.storage.as_ref()?.get_item(HIGH_SCORE_KEY).ok()??;
            parse_score(&raw)
        }

        fn save(&mut self, score: u32) {
            let Some(storage) = &self.storage else {
                return;
            };
            if let Err(e) = storage.set_item(HIGH_SCORE_KEY, &score.to_string()) {
                log::warn!("{}", EngineError::Storage(format!("{:?}", e)));
            } else {
                log::info!("High score {} saved", score);
            }
        }
    }
}
