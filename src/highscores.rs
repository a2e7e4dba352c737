//! High score persistence
//!
//! A single best score, kept in LocalStorage on the web. Storage failures
//! are swallowed and read back as "no high score".

/// Key-value home of the best score
pub trait HighScoreStore {
    /// Best score recorded so far, if any
    fn high_score(&self) -> Option<u64>;
    /// Record a new best score
    fn set_high_score(&mut self, score: u64);

    /// Record `score` if it beats the stored one (or nothing is stored).
    /// Returns true when it was written.
    fn submit(&mut self, score: u64) -> bool {
        let beats = self.high_score().is_none_or(|best| score > best);
        if beats {
            self.set_high_score(score);
        }
        beats
    }
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: Option<u64>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self { best: Some(score) }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn high_score(&self) -> Option<u64> {
        self.best
    }

    fn set_high_score(&mut self, score: u64) {
        self.best = Some(score);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageHighScore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "highScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScore {
    fn high_score(&self) -> Option<u64> {
        let storage = Self::storage()?;
        let raw = storage.get_item(Self::STORAGE_KEY).ok()??;
        raw.trim().parse().ok()
    }

    fn set_high_score(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("Failed to save high score");
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_score_is_always_recorded() {
        let mut store = MemoryHighScore::new();
        assert_eq!(store.high_score(), None);
        assert!(store.submit(0));
        assert_eq!(store.high_score(), Some(0));
    }

    #[test]
    fn test_only_strictly_higher_replaces() {
        let mut store = MemoryHighScore::with_score(500);
        assert!(!store.submit(500));
        assert!(!store.submit(10));
        assert_eq!(store.high_score(), Some(500));
        assert!(store.submit(501));
        assert_eq!(store.high_score(), Some(501));
    }
}
