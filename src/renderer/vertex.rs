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

/// Colors for game elements (0xRRGGBB)
pub mod colors {
    pub const SKY_TOP: u32 = 0x020617;
    pub const SKY_BOTTOM: u32 = 0x0f172a;
    pub const STAR: u32 = 0xffffff;

    pub const STAIR_TOP: u32 = 0x1e293b;
    pub const STAIR_BORDER: u32 = 0x334155;
    pub const STAIR_RIGHT: u32 = 0x0f172a;
    pub const STAIR_LEFT: u32 = 0x020617;

    pub const CURRENT_TOP: u32 = 0x3b82f6;
    pub const CURRENT_BORDER: u32 = 0x60a5fa;
    pub const CURRENT_RIGHT: u32 = 0x2563eb;
    pub const CURRENT_LEFT: u32 = 0x1d4ed8;

    pub const EYE: u32 = 0xffffff;
    pub const PUPIL: u32 = 0x0f172a;
    pub const SHADOW: u32 = 0x000000;
    pub const FACE: u32 = 0xffffff;
}
