//! Flappy Web - a side-scrolling flap-through-the-pipes arcade game
//!
//! Core modules:
//! - `sim`: Game simulation (physics, pipes, collisions, scoring, phases)
//! - `game`: Session driver tying the simulation to audio and best-score storage
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `platform`: Browser/native abstraction (frame clock, input, storage)
//! - `audio`: Sound cues over Web Audio

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioService, Cue, SilentAudio};
pub use game::Game;
pub use highscores::BestScore;
pub use settings::Settings;

/// Game configuration constants (world units)
pub mod consts {
    /// Logical world size; the canvas is scaled to fit while keeping this aspect
    pub const WORLD_WIDTH: f32 = 288.0;
    pub const WORLD_HEIGHT: f32 = 512.0;

    /// Height of the ground strip at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 112.0;
    /// Width of one ground tile (scroll offset wraps at this)
    pub const GROUND_TILE_WIDTH: f32 = 336.0;
    /// Top of the ground strip (floor of the playable band)
    pub const FLOOR_Y: f32 = WORLD_HEIGHT - GROUND_HEIGHT;

    /// Downward acceleration (px/s²)
    pub const GRAVITY: f32 = 1200.0;
    /// Vertical velocity set by a flap (px/s, negative is up)
    pub const FLAP_VELOCITY: f32 = -320.0;

    /// Fixed horizontal position of the bird's centre
    pub const BIRD_X: f32 = 64.0;
    /// Bird bounding box, centred on its position
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    /// Wing animation frames per second (three-frame cycle)
    pub const BIRD_FLAP_RATE: f32 = 10.0;
    pub const BIRD_FRAMES: f32 = 3.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_GAP: f32 = 140.0;
    /// Scroll speed for pipes and ground (px/s)
    pub const PIPE_SPEED: f32 = 120.0;
    /// Time between pipe spawns (ms), accumulated in f64 so that 90 frames
    /// of 1/60 s land exactly on the interval
    pub const PIPE_INTERVAL_MS: f64 = 1500.0;
    /// Keeps the whole gap on screen
    pub const PIPE_MARGIN: f32 = 40.0;
    /// Pipes enter just past the right edge
    pub const PIPE_SPAWN_X: f32 = WORLD_WIDTH + 10.0;
    /// Pipe rectangles extend this far beyond the gap (effectively unbounded)
    pub const PIPE_REACH: f32 = 1000.0;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_DT_MS: f64 = 33.0;

    /// Bird tilt range (radians), tilt = vy / TILT_DIVISOR
    pub const TILT_MIN: f32 = -0.35;
    pub const TILT_MAX: f32 = 0.70;
    pub const TILT_DIVISOR: f32 = 400.0;
}
