//! Shape generation for 2D primitives
//!
//! Everything is built from axis-aligned or rotated quads (two triangles).

use glam::Vec2;

use super::vertex::Vertex;

/// Append a filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    quad(
        out,
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        color,
    );
}

/// Append a rectangle given in a local frame that is rotated by `angle`
/// (radians, clockwise on screen) about `origin`
#[allow(clippy::too_many_arguments)]
pub fn rotated_rect(
    out: &mut Vec<Vertex>,
    origin: Vec2,
    angle: f32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: [f32; 4],
) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let rot = Vec2::from_angle(angle);
    let corner = |cx: f32, cy: f32| origin + rot.rotate(Vec2::new(cx, cy));
    quad(
        out,
        [
            corner(x, y),
            corner(x + w, y),
            corner(x + w, y + h),
            corner(x, y + h),
        ],
        color,
    );
}

/// Append a quad from four corners in winding order
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    // Two triangles
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}
