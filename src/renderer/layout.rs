//! Scale-to-fit canvas layout
//!
//! The world keeps its 288:512 aspect ratio inside whatever viewport the
//! page gives us. CSS size is in CSS pixels; the backing store is CSS size
//! times the (capped) device pixel ratio so sprites stay crisp.

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Canvas sizing for one viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Displayed size in CSS pixels
    pub css_width: f64,
    pub css_height: f64,
    /// Backing store size in device pixels
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// CSS pixels per world unit
    pub scale: f64,
    /// Device pixel ratio actually applied
    pub dpr: f64,
}

/// Fit the world into a `viewport_w` x `viewport_h` CSS-pixel viewport
pub fn fit_to_viewport(viewport_w: f64, viewport_h: f64, dpr: f64, max_dpr: f64) -> CanvasLayout {
    let world_w = WORLD_WIDTH as f64;
    let world_h = WORLD_HEIGHT as f64;

    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let dpr = dpr.min(max_dpr.max(1.0));

    let vw = if viewport_w.is_finite() { viewport_w.max(1.0) } else { world_w };
    let vh = if viewport_h.is_finite() { viewport_h.max(1.0) } else { world_h };
    let scale = (vw / world_w).min(vh / world_h);

    let css_width = world_w * scale;
    let css_height = world_h * scale;

    CanvasLayout {
        css_width,
        css_height,
        pixel_width: ((css_width * dpr).round() as u32).max(1),
        pixel_height: ((css_height * dpr).round() as u32).max(1),
        scale,
        dpr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_fit() {
        let layout = fit_to_viewport(288.0, 512.0, 1.0, 2.0);
        assert_eq!(layout.scale, 1.0);
        assert_eq!((layout.pixel_width, layout.pixel_height), (288, 512));
    }

    #[test]
    fn test_wide_viewport_is_height_bound() {
        let layout = fit_to_viewport(1920.0, 1024.0, 1.0, 2.0);
        assert_eq!(layout.scale, 2.0);
        assert_eq!(layout.css_width, 576.0);
        assert_eq!(layout.css_height, 1024.0);
    }

    #[test]
    fn test_dpr_is_capped() {
        let layout = fit_to_viewport(288.0, 512.0, 3.0, 2.0);
        assert_eq!(layout.dpr, 2.0);
        assert_eq!((layout.pixel_width, layout.pixel_height), (576, 1024));
    }

    #[test]
    fn test_degenerate_inputs() {
        let layout = fit_to_viewport(0.0, f64::NAN, f64::NAN, 2.0);
        assert_eq!(layout.dpr, 1.0);
        assert!(layout.pixel_width >= 1);
        assert!(layout.pixel_height >= 1);
    }

    proptest! {
        #[test]
        fn prop_fits_and_keeps_aspect(
            vw in 1.0f64..4000.0,
            vh in 1.0f64..4000.0,
            dpr in 0.5f64..4.0,
        ) {
            let layout = fit_to_viewport(vw, vh, dpr, 2.0);
            prop_assert!(layout.css_width <= vw + 1e-9);
            prop_assert!(layout.css_height <= vh + 1e-9);
            let aspect = layout.css_width / layout.css_height;
            prop_assert!((aspect - 288.0 / 512.0).abs() < 1e-9);
            prop_assert!(layout.dpr <= 2.0);
        }
    }
}
