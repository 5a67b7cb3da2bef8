//! Scene building
//!
//! Turns a `GameState` into a triangle list in world units. This is a pure
//! function of the state: nothing here mutates the simulation, so it can be
//! called any number of times per frame (or from tests) without side effects.
//!
//! Draw order, back to front: background, pipes, ground, bird, phase
//! overlays, then the live and best scores.

use glam::Vec2;

use super::font;
use super::shapes::{rect, rotated_rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Bird, GamePhase, GameState, Pipe};

/// Height of the lip at the open end of each pipe piece
const PIPE_CAP_HEIGHT: f32 = 24.0;
/// How far the lip overhangs the pipe body on each side
const PIPE_CAP_OVERHANG: f32 = 4.0;

/// Grass band along the top of the ground strip
const GRASS_HEIGHT: f32 = 12.0;
const GRASS_STRIPE_PITCH: f32 = 12.0;

/// HUD anchors (world units)
const LIVE_SCORE_Y: f32 = 30.0;
const LIVE_SCORE_SCALE: f32 = 4.0;
const BEST_RIGHT: f32 = WORLD_WIDTH - 10.0;
const BEST_Y: f32 = 10.0;
const BEST_SCALE: f32 = 2.0;
const TITLE_Y: f32 = 80.0;
const MENU_PROMPT_Y: f32 = 300.0;
const BANNER_Y: f32 = 120.0;
const FINAL_LABEL_Y: f32 = 180.0;
const FINAL_SCORE_Y: f32 = 200.0;
const RETRY_Y: f32 = 260.0;

/// One element of the heads-up display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudItem {
    /// "GET READY" title and tap hint on the menu
    MenuPrompt,
    /// "GAME OVER" banner
    GameOverBanner,
    /// Final score readout under the banner
    FinalScore(u32),
    /// Tap hint to leave the game-over screen
    RetryPrompt,
    /// Current run score at the top centre
    LiveScore(u32),
    /// Best score, small, in the top-right corner
    BestScore(u32),
}

/// HUD contents for the current phase, in draw order
pub fn hud_items(state: &GameState) -> Vec<HudItem> {
    let mut items = Vec::with_capacity(5);
    match state.phase {
        GamePhase::Menu => items.push(HudItem::MenuPrompt),
        GamePhase::Playing => {}
        GamePhase::GameOver => {
            items.push(HudItem::GameOverBanner);
            items.push(HudItem::FinalScore(state.score));
            items.push(HudItem::RetryPrompt);
        }
    }
    if state.phase != GamePhase::GameOver {
        items.push(HudItem::LiveScore(state.score));
    }
    items.push(HudItem::BestScore(state.best));
    items
}

/// Build the full frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    draw_background(&mut out);
    for pipe in &state.pipes {
        draw_pipe(&mut out, pipe);
    }
    draw_ground(&mut out, state.ground_offset);
    draw_bird(&mut out, &state.bird);
    for item in hud_items(state) {
        draw_hud_item(&mut out, item);
    }

    out
}

fn draw_background(out: &mut Vec<Vertex>) {
    rect(out, 0.0, 0.0, WORLD_WIDTH, FLOOR_Y, colors::SKY);

    // Cloud bank
    let cloud_top = FLOOR_Y - 110.0;
    rect(out, 0.0, cloud_top + 20.0, WORLD_WIDTH, 90.0, colors::CLOUD);
    for i in 0..10 {
        let x = i as f32 * 32.0 - 8.0;
        let rise = if i % 2 == 0 { 20.0 } else { 10.0 };
        rect(out, x, cloud_top + 20.0 - rise, 40.0, rise, colors::CLOUD);
    }

    // Skyline
    const BUILDINGS: [(f32, f32); 9] = [
        (0.0, 50.0),
        (26.0, 70.0),
        (52.0, 44.0),
        (86.0, 80.0),
        (118.0, 56.0),
        (150.0, 66.0),
        (184.0, 48.0),
        (214.0, 76.0),
        (250.0, 58.0),
    ];
    let skyline_base = FLOOR_Y - 20.0;
    for (x, h) in BUILDINGS {
        rect(out, x, skyline_base - h, 30.0, h, colors::CITY);
    }

    // Bushes along the horizon
    rect(out, 0.0, FLOOR_Y - 24.0, WORLD_WIDTH, 24.0, colors::BUSH);
    for i in 0..9 {
        let x = i as f32 * 34.0 - 6.0;
        rect(out, x, FLOOR_Y - 32.0, 24.0, 8.0, colors::BUSH);
        rect(out, x + 4.0, FLOOR_Y - 8.0, 20.0, 8.0, colors::BUSH_DARK);
    }
}

/// One pipe body with its lip at `lip_y`, spanning `body_top..body_bottom`
fn draw_pipe_piece(out: &mut Vec<Vertex>, x: f32, body_top: f32, body_bottom: f32, lip_y: f32) {
    let w = PIPE_WIDTH;
    rect(out, x - 2.0, body_top, w + 4.0, body_bottom - body_top, colors::PIPE_OUTLINE);
    rect(out, x, body_top, w, body_bottom - body_top, colors::PIPE);
    rect(out, x + 4.0, body_top, 6.0, body_bottom - body_top, colors::PIPE_LIGHT);
    rect(out, x + w - 10.0, body_top, 6.0, body_bottom - body_top, colors::PIPE_DARK);

    let lx = x - PIPE_CAP_OVERHANG;
    let lw = w + 2.0 * PIPE_CAP_OVERHANG;
    rect(out, lx - 2.0, lip_y - 2.0, lw + 4.0, PIPE_CAP_HEIGHT + 4.0, colors::PIPE_OUTLINE);
    rect(out, lx, lip_y, lw, PIPE_CAP_HEIGHT, colors::PIPE);
    rect(out, lx + 4.0, lip_y, 6.0, PIPE_CAP_HEIGHT, colors::PIPE_LIGHT);
    rect(out, lx + lw - 10.0, lip_y, 6.0, PIPE_CAP_HEIGHT, colors::PIPE_DARK);
}

fn draw_pipe(out: &mut Vec<Vertex>, pipe: &Pipe) {
    // Top piece hangs from the ceiling, lip at the bottom
    draw_pipe_piece(out, pipe.x, 0.0, pipe.top, pipe.top - PIPE_CAP_HEIGHT);
    // Bottom piece rises from the ground, lip at the top
    let bottom = pipe.gap_bottom();
    draw_pipe_piece(out, pipe.x, bottom, FLOOR_Y, bottom);
}

fn draw_ground(out: &mut Vec<Vertex>, offset: f32) {
    rect(out, 0.0, FLOOR_Y, WORLD_WIDTH, GROUND_HEIGHT, colors::DIRT);
    rect(out, 0.0, FLOOR_Y, WORLD_WIDTH, GRASS_HEIGHT, colors::GRASS);

    // Tiles scroll left and repeat every GROUND_TILE_WIDTH
    let mut tile_x = -offset;
    while tile_x < WORLD_WIDTH {
        let stripes = (GROUND_TILE_WIDTH / GRASS_STRIPE_PITCH) as usize;
        for i in 0..stripes {
            let x = tile_x + i as f32 * GRASS_STRIPE_PITCH;
            if x + GRASS_STRIPE_PITCH / 2.0 > 0.0 && x < WORLD_WIDTH {
                rect(out, x, FLOOR_Y + 2.0, GRASS_STRIPE_PITCH / 2.0, GRASS_HEIGHT - 4.0, colors::GRASS_LIGHT);
            }
        }
        tile_x += GROUND_TILE_WIDTH;
    }

    rect(out, 0.0, FLOOR_Y, WORLD_WIDTH, 2.0, colors::GRASS_EDGE);
    rect(out, 0.0, FLOOR_Y + GRASS_HEIGHT, WORLD_WIDTH, 4.0, colors::DIRT_DARK);
}

fn draw_bird(out: &mut Vec<Vertex>, bird: &Bird) {
    let origin = Vec2::new(bird.x, bird.y);
    let angle = bird.tilt();
    let mut part = |x: f32, y: f32, w: f32, h: f32, color: [f32; 4]| {
        rotated_rect(out, origin, angle, x, y, w, h, color);
    };

    // Body, local box is (-17, -12) .. (17, 12)
    part(-15.0, -12.0, 30.0, 24.0, colors::BIRD_OUTLINE);
    part(-17.0, -8.0, 34.0, 16.0, colors::BIRD_OUTLINE);
    part(-13.0, -10.0, 26.0, 20.0, colors::BIRD_BODY);
    part(-15.0, -6.0, 30.0, 12.0, colors::BIRD_BODY);
    part(-9.0, 2.0, 18.0, 6.0, colors::BIRD_BELLY);

    // Eye
    part(2.0, -11.0, 11.0, 11.0, colors::BIRD_OUTLINE);
    part(3.0, -10.0, 9.0, 9.0, colors::BIRD_EYE);
    part(8.0, -7.0, 3.0, 5.0, colors::BIRD_PUPIL);

    // Beak
    part(8.0, 0.0, 10.0, 8.0, colors::BIRD_OUTLINE);
    part(9.0, 1.0, 8.0, 6.0, colors::BIRD_BEAK);

    // Wing, three frames: up, mid, down
    let wing_y = match bird.sprite_frame() {
        0 => -4.0,
        1 => 0.0,
        _ => 4.0,
    };
    part(-16.0, wing_y - 4.0, 14.0, 10.0, colors::BIRD_OUTLINE);
    part(-15.0, wing_y - 3.0, 12.0, 8.0, colors::BIRD_WING);
}

fn draw_hud_item(out: &mut Vec<Vertex>, item: HudItem) {
    let cx = WORLD_WIDTH / 2.0;
    match item {
        HudItem::MenuPrompt => {
            font::draw_centered(out, "GET READY", cx, TITLE_Y, 3.0, colors::BANNER);
            font::draw_centered(out, "TAP TO FLAP", cx, MENU_PROMPT_Y, 2.0, colors::PROMPT);
        }
        HudItem::GameOverBanner => {
            font::draw_centered(out, "GAME OVER", cx, BANNER_Y, 3.0, colors::BANNER);
        }
        HudItem::FinalScore(score) => {
            font::draw_centered(out, "SCORE", cx, FINAL_LABEL_Y, 2.0, colors::TEXT);
            font::draw_number_centered(out, score, cx, FINAL_SCORE_Y, LIVE_SCORE_SCALE);
        }
        HudItem::RetryPrompt => {
            font::draw_centered(out, "TAP TO RETRY", cx, RETRY_Y, 2.0, colors::PROMPT);
        }
        HudItem::LiveScore(score) => {
            font::draw_number_centered(out, score, cx, LIVE_SCORE_Y, LIVE_SCORE_SCALE);
        }
        HudItem::BestScore(best) => {
            let digits_w = font::text_width(&best.to_string(), BEST_SCALE);
            font::draw_number_right(out, best, BEST_RIGHT, BEST_Y, BEST_SCALE);
            let label_right = BEST_RIGHT - digits_w - font::ADVANCE * BEST_SCALE;
            font::draw_right(out, "BEST", label_right, BEST_Y, BEST_SCALE, colors::TEXT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DeathCause;

    fn first_index(scene: &[Vertex], color: [f32; 4]) -> Option<usize> {
        scene.iter().position(|v| v.color == color)
    }

    fn last_index(scene: &[Vertex], color: [f32; 4]) -> Option<usize> {
        scene.iter().rposition(|v| v.color == color)
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(7, 3);
        state.activate();
        state.drain_events();
        state
    }

    #[test]
    fn test_hud_menu() {
        let state = GameState::new(1, 5);
        assert_eq!(
            hud_items(&state),
            vec![HudItem::MenuPrompt, HudItem::LiveScore(0), HudItem::BestScore(5)]
        );
    }

    #[test]
    fn test_hud_playing() {
        let mut state = playing_state();
        state.score = 2;
        assert_eq!(
            hud_items(&state),
            vec![HudItem::LiveScore(2), HudItem::BestScore(3)]
        );
    }

    #[test]
    fn test_hud_game_over_hides_live_score() {
        let mut state = playing_state();
        state.score = 4;
        state.end_run(DeathCause::Ground);
        let items = hud_items(&state);
        assert_eq!(
            items,
            vec![
                HudItem::GameOverBanner,
                HudItem::FinalScore(4),
                HudItem::RetryPrompt,
                HudItem::BestScore(4),
            ]
        );
        assert!(!items.iter().any(|i| matches!(i, HudItem::LiveScore(_))));
    }

    #[test]
    fn test_scene_is_triangles_and_starts_with_sky() {
        let scene = build_scene(&GameState::new(1, 0));
        assert_eq!(scene.len() % 6, 0);
        assert_eq!(scene[0].color, colors::SKY);
    }

    #[test]
    fn test_layer_order() {
        let mut state = playing_state();
        state.pipes.push(Pipe {
            id: 1,
            x: 120.0,
            top: 100.0,
            passed: false,
        });
        let scene = build_scene(&state);

        // Text must not share a colour with anything drawn before it
        for sprite in [
            colors::SKY,
            colors::CLOUD,
            colors::CITY,
            colors::BUSH,
            colors::PIPE,
            colors::PIPE_LIGHT,
            colors::DIRT,
            colors::GRASS_LIGHT,
            colors::BIRD_BODY,
            colors::BIRD_BELLY,
            colors::BIRD_WING,
            colors::BIRD_EYE,
            colors::BIRD_BEAK,
        ] {
            assert_ne!(sprite, colors::TEXT);
        }

        let last_pipe = last_index(&scene, colors::PIPE).unwrap();
        let first_dirt = first_index(&scene, colors::DIRT).unwrap();
        let first_body = first_index(&scene, colors::BIRD_BODY).unwrap();
        let first_text = first_index(&scene, colors::TEXT).unwrap();
        assert!(first_index(&scene, colors::SKY).unwrap() < first_index(&scene, colors::PIPE).unwrap());
        assert!(last_pipe < first_dirt);
        assert!(last_index(&scene, colors::DIRT).unwrap() < first_body);
        assert!(last_index(&scene, colors::BIRD_BODY).unwrap() < first_text);
        assert!(last_index(&scene, colors::BIRD_EYE).unwrap() < first_text);
    }

    #[test]
    fn test_pipe_pieces_span_gap() {
        let mut state = playing_state();
        let pipe = Pipe {
            id: 1,
            x: 100.0,
            top: 150.0,
            passed: false,
        };
        state.pipes.push(pipe);
        let scene = build_scene(&state);
        let pipe_ys: Vec<f32> = scene
            .iter()
            .filter(|v| v.color == colors::PIPE)
            .map(|v| v.position[1])
            .collect();
        assert!(pipe_ys.iter().any(|y| *y == 0.0));
        assert!(pipe_ys.iter().any(|y| *y == FLOOR_Y));
        // Nothing of the pipe body is drawn inside the gap
        assert!(!pipe_ys.iter().any(|y| *y > pipe.top && *y < pipe.gap_bottom()));
    }

    #[test]
    fn test_build_is_pure() {
        let mut state = playing_state();
        state.pipes.push(Pipe {
            id: 1,
            x: 60.0,
            top: 90.0,
            passed: false,
        });
        let before = (state.bird, state.pipes.clone(), state.score, state.phase);
        let a = build_scene(&state);
        let b = build_scene(&state);
        assert_eq!(a, b);
        assert_eq!(before, (state.bird, state.pipes.clone(), state.score, state.phase));
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_bird_rotates_with_velocity() {
        let mut level = playing_state();
        level.bird.vy = 0.0;
        let mut diving = playing_state();
        diving.bird.vy = 1000.0;

        let body = |s: &GameState| -> Vec<Vertex> {
            build_scene(s)
                .into_iter()
                .filter(|v| v.color == colors::BIRD_BODY)
                .collect()
        };
        assert_ne!(body(&level), body(&diving));
    }

    #[test]
    fn test_wing_frame_changes_sprite() {
        let mut a = playing_state();
        a.bird.frame = 0.0;
        let mut b = playing_state();
        b.bird.frame = 2.5;
        let wing = |s: &GameState| -> Vec<Vertex> {
            build_scene(s)
                .into_iter()
                .filter(|v| v.color == colors::BIRD_WING)
                .collect()
        };
        assert_ne!(wing(&a), wing(&b));
    }

    #[test]
    fn test_ground_scroll_moves_stripes() {
        let mut a = GameState::new(1, 0);
        a.ground_offset = 0.0;
        let mut b = GameState::new(1, 0);
        b.ground_offset = 5.0;
        let stripes = |s: &GameState| -> Vec<Vertex> {
            build_scene(s)
                .into_iter()
                .filter(|v| v.color == colors::GRASS_LIGHT)
                .collect()
        };
        assert_ne!(stripes(&a), stripes(&b));
    }
}
