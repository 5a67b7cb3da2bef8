//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as flat-colored triangles in world
//! units, then mapped to clip space and drawn in a single pass.

pub mod font;
pub mod layout;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use layout::{CanvasLayout, fit_to_viewport};
pub use pipeline::{RenderError, RenderState};
pub use scene::{HudItem, build_scene, hud_items};
pub use vertex::Vertex;
