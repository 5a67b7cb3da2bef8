//! Frame timing
//!
//! Turns absolute animation-frame timestamps into bounded simulation deltas.

use crate::consts::MAX_FRAME_DT_MS;

/// Computes per-frame delta time from `requestAnimationFrame` timestamps.
///
/// The first timestamp after construction or `reset` yields a zero delta.
/// Deltas are capped so a stalled or backgrounded tab cannot inject one huge
/// physics step.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Forget the previous timestamp (next frame yields dt = 0)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Whether a frame has been observed since the last reset
    pub fn is_primed(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Delta in seconds since the previous frame, in [0, MAX_FRAME_DT_MS / 1000]
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let last = *self.last_ms.get_or_insert(timestamp_ms);
        self.last_ms = Some(timestamp_ms);

        let elapsed = timestamp_ms - last;
        if !elapsed.is_finite() {
            return 0.0;
        }
        (elapsed.clamp(0.0, MAX_FRAME_DT_MS) / 1000.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_primed());
        assert_eq!(clock.advance(123_456.0), 0.0);
        assert!(clock.is_primed());
    }

    #[test]
    fn test_regular_frame() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        let dt = clock.advance(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let dt = clock.advance(5_000.0);
        assert!((dt - 0.033).abs() < 1e-6);
        // Next frame measures from the stalled timestamp, not the old one
        let dt = clock.advance(5_010.0);
        assert!((dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restarts_at_zero() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(16.0);
        clock.reset();
        assert_eq!(clock.advance(900.0), 0.0);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::new();
        clock.advance(100.0);
        assert_eq!(clock.advance(50.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_dt_is_bounded(stamps in proptest::collection::vec(-1.0e9f64..1.0e9, 1..100)) {
            let mut clock = FrameClock::new();
            for t in stamps {
                let dt = clock.advance(t);
                prop_assert!((0.0..=0.033).contains(&dt));
            }
        }
    }
}
