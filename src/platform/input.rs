//! Input normalization
//!
//! Pointer, touch and a few keys all collapse into one "activate" intent.
//! A single physical press can surface as several DOM events (a tap fires
//! `pointerdown` and `touchstart`, and browsers may emulate `mousedown`
//! afterwards), so presses are gated before they reach the game.

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Touch,
    Keyboard,
}

/// Keys that activate: Space, ArrowUp and W
pub fn is_activation_key(code: &str, key: &str) -> bool {
    matches!(code, "Space" | "ArrowUp" | "KeyW") || matches!(key, " " | "ArrowUp" | "w" | "W")
}

/// Key that toggles sound
pub fn is_mute_key(code: &str) -> bool {
    code == "KeyM"
}

/// De-duplicates presses across input types.
///
/// A press from a different source than the previous accepted press, arriving
/// within `window_ms`, is treated as the same gesture and dropped. Presses
/// from the same source always count, so rapid tapping still flaps every time.
/// Keyboard auto-repeat never counts.
#[derive(Debug, Clone)]
pub struct PressGate {
    window_ms: f64,
    last: Option<(InputSource, f64)>,
}

impl Default for PressGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW_MS)
    }
}

impl PressGate {
    /// Long enough to cover emulated mouse events after a touch
    pub const DEFAULT_WINDOW_MS: f64 = 400.0;

    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    /// Returns true if this press should produce an activation
    pub fn accept(&mut self, source: InputSource, timestamp_ms: f64, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        if let Some((last_source, last_ms)) = self.last {
            let elapsed = timestamp_ms - last_ms;
            if last_source != source && elapsed >= 0.0 && elapsed < self.window_ms {
                log::debug!("Dropped {:?} press ({:.0} ms after {:?})", source, elapsed, last_source);
                return false;
            }
        }
        self.last = Some((source, timestamp_ms));
        true
    }
}
