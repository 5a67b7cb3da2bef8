//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert 8-bit sRGB components to a vertex color
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const SKY: [f32; 4] = rgb(78, 192, 202);
    pub const CLOUD: [f32; 4] = rgb(233, 252, 217);
    pub const CITY: [f32; 4] = rgb(167, 222, 201);
    pub const BUSH: [f32; 4] = rgb(94, 226, 112);
    pub const BUSH_DARK: [f32; 4] = rgb(82, 192, 96);

    pub const GRASS: [f32; 4] = rgb(115, 191, 46);
    pub const GRASS_LIGHT: [f32; 4] = rgb(156, 230, 89);
    pub const GRASS_EDGE: [f32; 4] = rgb(84, 56, 71);
    pub const DIRT: [f32; 4] = rgb(222, 216, 149);
    pub const DIRT_DARK: [f32; 4] = rgb(210, 185, 110);

    pub const PIPE: [f32; 4] = rgb(116, 191, 46);
    pub const PIPE_LIGHT: [f32; 4] = rgb(157, 231, 90);
    pub const PIPE_DARK: [f32; 4] = rgb(84, 128, 36);
    pub const PIPE_OUTLINE: [f32; 4] = rgb(84, 56, 71);

    pub const BIRD_BODY: [f32; 4] = rgb(245, 200, 66);
    pub const BIRD_BELLY: [f32; 4] = rgb(255, 225, 100);
    pub const BIRD_WING: [f32; 4] = rgb(250, 250, 230);
    pub const BIRD_OUTLINE: [f32; 4] = rgb(84, 56, 71);
    pub const BIRD_EYE: [f32; 4] = rgb(255, 255, 255);
    pub const BIRD_PUPIL: [f32; 4] = rgb(20, 20, 20);
    pub const BIRD_BEAK: [f32; 4] = rgb(240, 110, 50);

    /// Warm white, kept apart from every sprite colour
    pub const TEXT: [f32; 4] = rgb(255, 251, 240);
    pub const TEXT_SHADOW: [f32; 4] = rgb(84, 56, 71);
    pub const BANNER: [f32; 4] = rgb(252, 160, 72);
    pub const PROMPT: [f32; 4] = rgb(255, 132, 40);
}
