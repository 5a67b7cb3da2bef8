//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here as plain owned fields.
//! Side effects (sounds, best-score writes) are not performed by the
//! simulation; it records `GameEvent`s that the session driver drains.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Coarse game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the first activation
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for an activation to return to the menu
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Bird box overlapped a pipe
    Pipe,
    /// Bird reached the ground strip
    Ground,
}

/// Something that happened during a tick or an activation.
///
/// Events are appended in the order they occur and drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Menu -> Playing
    RunStarted,
    /// Flap applied while playing
    Flapped,
    /// A pipe was passed; carries the new score
    Scored { score: u32 },
    /// Best score went up; carries the new best
    BestRaised { best: u32 },
    /// Bird struck a pipe (precedes `GameOver`)
    PipeHit,
    /// Playing -> GameOver
    GameOver { cause: DeathCause, score: u32, best: u32 },
    /// GameOver -> Menu
    ReturnedToMenu,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Horizontal centre (fixed)
    pub x: f32,
    /// Vertical centre (world units, y grows downward)
    pub y: f32,
    /// Vertical velocity (px/s)
    pub vy: f32,
    /// Wing animation phase in [0, 3)
    pub frame: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: WORLD_HEIGHT / 2.0,
            vy: 0.0,
            frame: 0.0,
        }
    }
}

impl Bird {
    /// Set the upward flap velocity
    pub fn flap(&mut self) {
        self.vy = FLAP_VELOCITY;
    }

    /// Sprite frame index (0 = wings up, 1 = mid, 2 = down)
    pub fn sprite_frame(&self) -> usize {
        (self.frame.floor() as usize).min(BIRD_FRAMES as usize - 1)
    }

    /// Rotation in radians, nose-down when falling
    pub fn tilt(&self) -> f32 {
        (self.vy / TILT_DIVISOR).clamp(TILT_MIN, TILT_MAX)
    }
}

/// A pipe pair with a gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub top: f32,
    /// Already scored
    pub passed: bool,
}

impl Pipe {
    /// Bottom of the gap
    pub fn gap_bottom(&self) -> f32 {
        self.top + PIPE_GAP
    }

    /// Horizontal centre; crossing it scores the pipe
    pub fn center_x(&self) -> f32 {
        self.x + PIPE_WIDTH / 2.0
    }

    /// Entirely left of the screen
    pub fn is_offscreen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Pipes in spawn order
    pub pipes: Vec<Pipe>,
    /// Current run score
    pub score: u32,
    /// Best score across sessions
    pub best: u32,
    /// Ground scroll offset in [0, GROUND_TILE_WIDTH)
    pub ground_offset: f32,
    /// Milliseconds since the last pipe spawn
    pub spawn_timer_ms: f64,
    /// Gap placement RNG
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a menu-phase state with the given seed and stored best score
    pub fn new(seed: u64, best: u32) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            bird: Bird::default(),
            pipes: Vec::new(),
            score: 0,
            best,
            ground_offset: 0.0,
            spawn_timer_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new pipe ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Dispatch the normalized "activate" intent by phase
    pub fn activate(&mut self) {
        match self.phase {
            GamePhase::Menu => self.start_run(),
            GamePhase::Playing => self.flap(),
            GamePhase::GameOver => self.return_to_menu(),
        }
    }

    /// Menu -> Playing: reset the world and zero the score
    pub fn start_run(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.bird = Bird::default();
        self.pipes.clear();
        self.ground_offset = 0.0;
        self.spawn_timer_ms = 0.0;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (best {})", self.best);
    }

    /// Flap while playing
    pub fn flap(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.bird.flap();
        self.events.push(GameEvent::Flapped);
    }

    /// GameOver -> Menu (no reset; that happens on the next start)
    pub fn return_to_menu(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::Menu;
        self.events.push(GameEvent::ReturnedToMenu);
    }

    /// Score one pipe, raising the best score when exceeded
    pub(crate) fn award_point(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::Scored { score: self.score });
        self.raise_best();
    }

    /// Playing -> GameOver
    pub(crate) fn end_run(&mut self, cause: DeathCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if cause == DeathCause::Pipe {
            self.events.push(GameEvent::PipeHit);
        }
        self.raise_best();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            cause,
            score: self.score,
            best: self.best,
        });
        log::info!(
            "Game over ({:?}): score {}, best {}",
            cause,
            self.score,
            self.best
        );
    }

    fn raise_best(&mut self) {
        if self.score > self.best {
            self.best = self.score;
            self.events.push(GameEvent::BestRaised { best: self.best });
        }
    }

    /// Events recorded since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
