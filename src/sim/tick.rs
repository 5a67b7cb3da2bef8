//! Variable timestep simulation tick
//!
//! Advances the world by one frame's delta. Ground scrolling always runs;
//! everything else only runs while playing.

use rand::Rng;

use super::collision::{bird_cleared_pipe, bird_hits_pipe, bird_on_ground};
use super::state::{DeathCause, GamePhase, GameState, Pipe};
use crate::consts::*;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    // Cosmetic, keeps the title and game-over screens alive
    state.ground_offset = (state.ground_offset + PIPE_SPEED * dt).rem_euclid(GROUND_TILE_WIDTH);

    if state.phase != GamePhase::Playing {
        return;
    }

    // Bird physics
    let bird = &mut state.bird;
    bird.vy += GRAVITY * dt;
    bird.y += bird.vy * dt;
    bird.frame = (bird.frame + dt * BIRD_FLAP_RATE).rem_euclid(BIRD_FRAMES);

    // Spawn pipes
    state.spawn_timer_ms += f64::from(dt) * 1000.0;
    if state.spawn_timer_ms >= PIPE_INTERVAL_MS {
        state.spawn_timer_ms = 0.0;
        spawn_pipe(state);
    }

    for pipe in &mut state.pipes {
        pipe.x -= PIPE_SPEED * dt;
    }

    // Collisions and scoring, in spawn order
    for i in 0..state.pipes.len() {
        let pipe = state.pipes[i];
        if bird_hits_pipe(&state.bird, &pipe) {
            state.end_run(DeathCause::Pipe);
            return;
        }
        if !pipe.passed && bird_cleared_pipe(&state.bird, &pipe) {
            state.pipes[i].passed = true;
            state.award_point();
            log::debug!("Pipe {} passed, score {}", pipe.id, state.score);
        }
    }

    // Drop pipes that have left the screen
    state.pipes.retain(|p| !p.is_offscreen());

    if bird_on_ground(&state.bird) {
        state.end_run(DeathCause::Ground);
        return;
    }

    // The ceiling stops the bird but is not fatal
    let half_height = BIRD_HEIGHT / 2.0;
    if state.bird.y - half_height < 0.0 {
        state.bird.y = half_height;
        state.bird.vy = 0.0;
    }
}

/// Vertical span available for the gap's top edge
pub fn gap_top_range() -> (f32, f32) {
    let span = WORLD_HEIGHT - GROUND_HEIGHT - PIPE_GAP - 2.0 * PIPE_MARGIN;
    (PIPE_MARGIN, PIPE_MARGIN + span)
}

/// Append a pipe at the right edge with a random gap position
pub fn spawn_pipe(state: &mut GameState) {
    let (min_top, max_top) = gap_top_range();
    let u: f32 = state.rng.random();
    let top = min_top + u * (max_top - min_top);
    let id = state.next_entity_id();
    state.pipes.push(Pipe {
        id,
        x: PIPE_SPAWN_X,
        top,
        passed: false,
    });
    log::debug!("Spawned pipe {} with gap at {:.1}", id, top);
}
