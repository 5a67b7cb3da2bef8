//! Collision detection for the bird and pipes
//!
//! Everything is axis-aligned. The bird uses a fixed-size box centred on its
//! position and never rotates for collision purposes, whatever the sprite tilt.

use super::state::{Bird, Pipe};
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// The bird's collision box
pub fn bird_bounds(bird: &Bird) -> Rect {
    Rect::new(
        bird.x - BIRD_WIDTH / 2.0,
        bird.y - BIRD_HEIGHT / 2.0,
        BIRD_WIDTH,
        BIRD_HEIGHT,
    )
}

/// Upper and lower pipe rectangles, each reaching far past the screen
pub fn pipe_bounds(pipe: &Pipe) -> (Rect, Rect) {
    let upper = Rect::new(pipe.x, -PIPE_REACH, PIPE_WIDTH, pipe.top + PIPE_REACH);
    let lower = Rect::new(pipe.x, pipe.gap_bottom(), PIPE_WIDTH, PIPE_REACH);
    (upper, lower)
}

/// Does the bird overlap either half of the pipe?
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let bounds = bird_bounds(bird);
    let (upper, lower) = pipe_bounds(pipe);
    bounds.intersects(&upper) || bounds.intersects(&lower)
}

/// Has the pipe's centre scrolled past the bird?
pub fn bird_cleared_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    pipe.center_x() < bird.x
}

/// Has the bird's lower edge reached the ground?
pub fn bird_on_ground(bird: &Bird) -> bool {
    bird_bounds(bird).bottom() >= FLOOR_Y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pipe_at(x: f32, top: f32) -> Pipe {
        Pipe {
            id: 1,
            x,
            top,
            passed: false,
        }
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_bird_in_gap_is_safe() {
        let bird = Bird {
            y: 200.0,
            ..Bird::default()
        };
        // Gap spans 140..280, bird box spans 188..212
        let pipe = pipe_at(bird.x - 10.0, 140.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_hits_upper_pipe() {
        let bird = Bird {
            y: 150.0,
            ..Bird::default()
        };
        let pipe = pipe_at(bird.x - 10.0, 140.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_hits_lower_pipe() {
        let bird = Bird {
            y: 275.0,
            ..Bird::default()
        };
        let pipe = pipe_at(bird.x - 10.0, 140.0);
        assert!(bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_bird_touching_gap_edge_is_safe() {
        // Bird top edge exactly on the gap top
        let bird = Bird {
            y: 140.0 + BIRD_HEIGHT / 2.0,
            ..Bird::default()
        };
        let pipe = pipe_at(bird.x - 10.0, 140.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_pipe_ahead_is_not_hit() {
        let bird = Bird::default();
        // Pipe leading edge exactly at the bird's right edge
        let pipe = pipe_at(bird.x + BIRD_WIDTH / 2.0, 0.0);
        assert!(!bird_hits_pipe(&bird, &pipe));
    }

    #[test]
    fn test_cleared_at_centre() {
        let bird = Bird::default();
        let pipe = pipe_at(bird.x - PIPE_WIDTH / 2.0, 100.0);
        assert!(!bird_cleared_pipe(&bird, &pipe));
        let pipe = pipe_at(bird.x - PIPE_WIDTH / 2.0 - 0.5, 100.0);
        assert!(bird_cleared_pipe(&bird, &pipe));
    }

    #[test]
    fn test_ground_contact() {
        let mut bird = Bird::default();
        bird.y = FLOOR_Y - BIRD_HEIGHT / 2.0 - 0.1;
        assert!(!bird_on_ground(&bird));
        bird.y = FLOOR_Y - BIRD_HEIGHT / 2.0;
        assert!(bird_on_ground(&bird));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_adjacent_rects_never_collide(a in rect_strategy(), w in 0.5f32..200.0, h in 0.5f32..200.0) {
            let right = Rect::new(a.right(), a.y, w, h);
            let below = Rect::new(a.x, a.bottom(), w, h);
            prop_assert!(!a.intersects(&right));
            prop_assert!(!a.intersects(&below));
        }
    }
}
