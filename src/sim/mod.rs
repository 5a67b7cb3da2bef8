//! Game simulation module
//!
//! All gameplay logic lives here:
//! - Bird physics and the pipe stream
//! - Collision and scoring
//! - Phase transitions (menu, playing, game over)
//!
//! No rendering, audio or platform dependencies. Side effects are reported
//! as `GameEvent`s for the caller to act on.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, bird_bounds, bird_hits_pipe, pipe_bounds};
pub use state::{Bird, DeathCause, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{spawn_pipe, tick};
