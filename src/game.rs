//! Session driver
//!
//! `Game` owns the simulation plus its collaborators (frame clock, audio,
//! storage) and turns simulation events into sounds and best-score writes.
//! It is the only thing the browser shell talks to: one `frame` per
//! animation frame and one `press` per input event, both on the same thread.

use crate::audio::{AudioService, Cue};
use crate::highscores::BestScore;
use crate::platform::input::{InputSource, PressGate};
use crate::platform::storage::KeyValueStore;
use crate::platform::time::FrameClock;
use crate::renderer::scene::build_scene;
use crate::renderer::vertex::Vertex;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// A running game session
pub struct Game<A: AudioService, S: KeyValueStore> {
    state: GameState,
    clock: FrameClock,
    gate: PressGate,
    best: BestScore,
    settings: Settings,
    audio: A,
    store: S,
}

impl<A: AudioService, S: KeyValueStore> Game<A, S> {
    /// Load persisted best score and settings, start on the menu
    pub fn new(seed: u64, audio: A, store: S) -> Self {
        let best = BestScore::load(&store);
        let settings = Settings::load(&store);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, best.get()),
            clock: FrameClock::new(),
            gate: PressGate::default(),
            best,
            settings,
            audio,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one animation frame; returns the delta fed to the simulation
    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        if !self.clock.is_primed() {
            log::debug!("Frame clock primed at {:.1} ms", timestamp_ms);
        }
        let dt = self.clock.advance(timestamp_ms);
        tick(&mut self.state, dt);
        self.process_events();
        dt
    }

    /// Geometry for the current frame (world units)
    pub fn scene(&self) -> Vec<Vertex> {
        build_scene(&self.state)
    }

    /// A raw press from the input surface; returns true if it activated
    pub fn press(&mut self, source: InputSource, timestamp_ms: f64, repeat: bool) -> bool {
        if !self.gate.accept(source, timestamp_ms, repeat) {
            return false;
        }
        self.activate();
        true
    }

    /// The normalized activate intent
    pub fn activate(&mut self) {
        self.audio.unlock();
        let before = self.state.phase;
        self.state.activate();
        if before != self.state.phase {
            log::info!("Phase {} -> {}", before.as_str(), self.state.phase.as_str());
        }
        self.process_events();
    }

    pub fn toggle_mute(&mut self) {
        self.settings.toggle_mute();
        log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
        self.settings.save(&mut self.store);
    }

    fn cue(&mut self, cue: Cue) {
        let volume = cue.base_volume() * self.settings.effective_volume();
        if volume > 0.0 {
            self.audio.play(cue, volume);
        }
    }

    fn process_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::RunStarted => {
                    self.clock.reset();
                    self.audio.prefetch(&Cue::ALL);
                    self.cue(Cue::Swoosh);
                }
                GameEvent::Flapped => self.cue(Cue::Wing),
                GameEvent::Scored { .. } => self.cue(Cue::Point),
                GameEvent::BestRaised { best } => {
                    self.best.record(best, &mut self.store);
                }
                GameEvent::PipeHit => self.cue(Cue::Hit),
                GameEvent::GameOver { .. } => self.cue(Cue::Die),
                GameEvent::ReturnedToMenu => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordingAudio, SilentAudio};
    use crate::consts::*;
    use crate::platform::storage::MemoryStorage;
    use crate::sim::Pipe;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    type TestGame = Game<RecordingAudio, MemoryStorage>;

    fn new_game() -> TestGame {
        Game::new(1234, RecordingAudio::new(), MemoryStorage::new())
    }

    /// Run frames at 60 fps starting at `start_ms`, flapping to hover mid-screen
    fn hover(game: &mut TestGame, start_ms: f64, frames: usize) -> f64 {
        let mut t = start_ms;
        for _ in 0..frames {
            if game.state().bird.y > 260.0 {
                game.activate();
            }
            game.frame(t);
            t += FRAME_MS;
        }
        t
    }

    #[test]
    fn test_start_scenario() {
        let mut game = new_game();
        assert_eq!(game.phase(), GamePhase::Menu);
        game.frame(0.0);
        game.frame(FRAME_MS);

        game.activate();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().bird.y, WORLD_HEIGHT / 2.0);
        assert!(game.state().pipes.is_empty());
        assert_eq!(game.audio().cues(), vec![Cue::Swoosh]);
        assert_eq!(game.audio().prefetched.len(), Cue::ALL.len());

        // First frame after the start measures nothing
        assert_eq!(game.frame(10_000.0), 0.0);

        // 89 frames of 1/60 s: no pipe yet
        let t = hover(&mut game, 10_000.0 + FRAME_MS, 89);
        assert!(game.state().pipes.is_empty());
        // The 90th frame reaches 1500 ms and spawns exactly one
        let t = hover(&mut game, t, 1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().pipes.len(), 1);

        // Stop flapping and fall
        let mut t = t;
        let mut frames = 0;
        while game.phase() == GamePhase::Playing && frames < 200 {
            game.frame(t);
            t += FRAME_MS;
            frames += 1;
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.audio().cues().last(), Some(&Cue::Die));
        assert_eq!(game.audio().count(Cue::Hit), 0);
        assert_eq!(game.best_score(), 0);
    }

    #[test]
    fn test_game_over_returns_to_menu_then_restarts() {
        let mut game = new_game();
        game.activate();
        let mut t = 0.0;
        while game.phase() == GamePhase::Playing {
            game.frame(t);
            t += FRAME_MS;
        }
        // Frames keep running on the game-over screen without changing it
        game.frame(t);
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.activate();
        assert_eq!(game.phase(), GamePhase::Menu);
        game.activate();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.audio().count(Cue::Swoosh), 2);
    }

    #[test]
    fn test_flap_plays_wing() {
        let mut game = new_game();
        game.activate();
        game.activate();
        assert_eq!(game.state().bird.vy, FLAP_VELOCITY);
        assert_eq!(game.audio().cues(), vec![Cue::Swoosh, Cue::Wing]);
        assert_eq!(game.audio().played[1].1, 0.5);
        assert_eq!(game.audio().unlocks, 2);
    }

    #[test]
    fn test_scoring_persists_best() {
        let mut game = new_game();
        game.activate();
        game.frame(0.0);
        game.state.bird.y = 200.0;
        game.state.pipes.push(Pipe {
            id: 99,
            x: BIRD_X - PIPE_WIDTH / 2.0 + 0.5,
            top: 140.0,
            passed: false,
        });
        game.frame(FRAME_MS);

        assert_eq!(game.state().score, 1);
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.store().raw(BestScore::STORAGE_KEY), Some("1"));
        assert_eq!(game.audio().cues(), vec![Cue::Swoosh, Cue::Point]);
        assert_eq!(game.audio().played[1].1, 0.6);
    }

    #[test]
    fn test_pipe_hit_plays_hit_then_die() {
        let mut game = new_game();
        game.activate();
        game.frame(0.0);
        game.state.pipes.push(Pipe {
            id: 99,
            x: BIRD_X - 10.0,
            top: 350.0,
            passed: false,
        });
        game.frame(FRAME_MS);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.audio().cues(), vec![Cue::Swoosh, Cue::Hit, Cue::Die]);
    }

    #[test]
    fn test_best_loaded_and_kept() {
        let store = MemoryStorage::with_entry(BestScore::STORAGE_KEY, "12");
        let mut game = Game::new(1, RecordingAudio::new(), store);
        assert_eq!(game.best_score(), 12);
        assert_eq!(game.state().best, 12);

        game.activate();
        let mut t = 0.0;
        while game.phase() == GamePhase::Playing {
            game.frame(t);
            t += FRAME_MS;
        }
        assert_eq!(game.best_score(), 12);
        assert_eq!(game.store().raw(BestScore::STORAGE_KEY), Some("12"));
    }

    #[test]
    fn test_unavailable_storage_is_harmless() {
        let mut game = Game::new(1, RecordingAudio::new(), MemoryStorage::unavailable());
        assert_eq!(game.best_score(), 0);
        game.activate();
        game.frame(0.0);
        game.state.bird.y = 200.0;
        game.state.pipes.push(Pipe {
            id: 1,
            x: BIRD_X - PIPE_WIDTH / 2.0 + 0.5,
            top: 140.0,
            passed: false,
        });
        game.frame(FRAME_MS);
        assert_eq!(game.best_score(), 1);
        game.toggle_mute();
        assert!(game.settings().muted);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut game = new_game();
        game.toggle_mute();
        game.activate();
        game.activate();
        assert!(game.audio().played.is_empty());
        // Preference was persisted
        assert!(Settings::load(game.store()).muted);
    }

    #[test]
    fn test_press_deduplicates_gesture() {
        let mut game = new_game();
        assert!(game.press(InputSource::Touch, 100.0, false));
        assert!(!game.press(InputSource::Pointer, 110.0, false));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.audio().count(Cue::Wing), 0);
    }

    #[test]
    fn test_stalled_frame_is_capped() {
        let mut game = new_game();
        game.activate();
        game.frame(0.0);
        let dt = game.frame(60_000.0);
        assert!((dt - 0.033).abs() < 1e-6);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_menu_frames_scroll_ground_only() {
        let mut game = new_game();
        game.frame(0.0);
        game.frame(FRAME_MS);
        assert!(game.state().ground_offset > 0.0);
        assert_eq!(game.state().bird.y, WORLD_HEIGHT / 2.0);
    }

    #[test]
    fn test_run_start_reprimes_clock() {
        let mut game = new_game();
        assert!(!game.clock.is_primed());
        game.frame(0.0);
        assert!(game.clock.is_primed());

        game.activate();
        assert!(!game.clock.is_primed());
        // A long menu idle is not charged to the first playing frame
        assert_eq!(game.frame(90_000.0), 0.0);
        assert!(game.clock.is_primed());
        assert_eq!(game.state().bird.y, WORLD_HEIGHT / 2.0);
    }

    #[test]
    fn test_runs_without_audio() {
        let mut game = Game::new(7, SilentAudio, MemoryStorage::new());
        game.activate();
        game.frame(0.0);
        game.state.bird.y = 200.0;
        game.state.pipes.push(Pipe {
            id: 1,
            x: BIRD_X - PIPE_WIDTH / 2.0 + 0.5,
            top: 140.0,
            passed: false,
        });
        let mut t = FRAME_MS;
        while game.phase() == GamePhase::Playing {
            game.frame(t);
            t += FRAME_MS;
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.best_score(), 1);
        assert_eq!(game.store().raw(BestScore::STORAGE_KEY), Some("1"));
    }

    #[test]
    fn test_scene_is_not_empty() {
        let game = new_game();
        let scene = game.scene();
        assert!(!scene.is_empty());
        assert_eq!(scene.len() % 3, 0);
    }
}
