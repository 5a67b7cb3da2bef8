//! Best score tracking
//!
//! Persisted to LocalStorage as a bare JSON number. Read once at startup,
//! written whenever it goes up.

use crate::platform::storage::{KeyValueStore, load_json, save_json};

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "fb_highscore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Load from storage, falling back to 0 if missing, corrupt or unavailable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<u32>(store, Self::STORAGE_KEY) {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score ({}), using 0", e);
                Self::default()
            }
        }
    }

    /// Record a score; persists and returns true only if it beats the best
    pub fn record(&mut self, score: u32, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = save_json(store, Self::STORAGE_KEY, &self.value) {
            log::warn!("Could not save best score {}: {}", self.value, e);
        }
        true
    }
}
