//! 5x7 bitmap font for scores and overlay text
//!
//! Glyphs are drawn as one quad per lit cell, in world units. Only the
//! characters the HUD needs are defined; anything else advances as a blank.

use super::shapes;
use super::vertex::{Vertex, colors};

/// Glyph cell size in font pixels
pub const GLYPH_WIDTH: f32 = 5.0;
pub const GLYPH_HEIGHT: f32 = 7.0;
/// Horizontal advance per character (glyph plus one column of spacing)
pub const ADVANCE: f32 = GLYPH_WIDTH + 1.0;

/// Rows top to bottom, bit 4 is the leftmost column
type Glyph = [u8; 7];

fn glyph(c: char) -> Option<Glyph> {
    let rows = match c.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        _ => return None,
    };
    Some(rows)
}

/// Width of `text` at `scale`, without trailing spacing
pub fn text_width(text: &str, scale: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        0.0
    } else {
        (n as f32 * ADVANCE - 1.0) * scale
    }
}

/// Draw `text` with its top-left corner at (x, y)
pub fn draw_text(out: &mut Vec<Vertex>, text: &str, x: f32, y: f32, scale: f32, color: [f32; 4]) {
    let mut pen = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH as u8 {
                    if bits & (0x10 >> col) != 0 {
                        shapes::rect(
                            out,
                            pen + col as f32 * scale,
                            y + row as f32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        pen += ADVANCE * scale;
    }
}

/// Draw `text` with a drop shadow one font pixel down and right
pub fn draw_shadowed(out: &mut Vec<Vertex>, text: &str, x: f32, y: f32, scale: f32, color: [f32; 4]) {
    draw_text(out, text, x + scale, y + scale, scale, colors::TEXT_SHADOW);
    draw_text(out, text, x, y, scale, color);
}

/// Draw `text` horizontally centred on `cx`, top at `y`
pub fn draw_centered(out: &mut Vec<Vertex>, text: &str, cx: f32, y: f32, scale: f32, color: [f32; 4]) {
    let x = cx - text_width(text, scale) / 2.0;
    draw_shadowed(out, text, x, y, scale, color);
}

/// Draw `text` with its right edge at `right`, top at `y`
pub fn draw_right(out: &mut Vec<Vertex>, text: &str, right: f32, y: f32, scale: f32, color: [f32; 4]) {
    let x = right - text_width(text, scale);
    draw_shadowed(out, text, x, y, scale, color);
}

/// Fixed-width digits centred on `cx`
pub fn draw_number_centered(out: &mut Vec<Vertex>, value: u32, cx: f32, y: f32, scale: f32) {
    draw_centered(out, &value.to_string(), cx, y, scale, colors::TEXT);
}

/// Fixed-width digits right-anchored at `right`
pub fn draw_number_right(out: &mut Vec<Vertex>, value: u32, right: f32, y: f32, scale: f32) {
    draw_right(out, &value.to_string(), right, y, scale, colors::TEXT);
}
