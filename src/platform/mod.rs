//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Input normalization
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Runtime lifecycle (one live frame loop per page)

pub mod input;
pub mod lifecycle;
pub mod storage;
pub mod time;

pub use input::{InputSource, PressGate, is_activation_key, is_mute_key};
pub use lifecycle::{RuntimeSlot, Stoppable};
pub use storage::{KeyValueStore, MemoryStorage, StorageError, load_json, save_json};
pub use time::FrameClock;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
