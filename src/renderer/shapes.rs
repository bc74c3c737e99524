//! Shape generation for 2D primitives
//!
//! `Mesh` collects triangle-list vertices for the GPU pipeline and is the
//! production `Painter`.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::painter::{Color, Painter};
use super::vertex::Vertex;

/// Segments per rounded corner
const CORNER_SEGMENTS: u32 = 6;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Outline of a rounded rectangle, clockwise in screen space
pub fn rounded_rect_outline(min: Vec2, size: Vec2, radius: f32) -> Vec<Vec2> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    let max = min + size;
    // corner centers with the angle each quarter arc starts at
    let corners = [
        (Vec2::new(max.x - r, min.y + r), -FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Vec2::new(min.x + r, min.y + r), PI),
    ];

    let mut points = Vec::with_capacity((corners.len() as u32 * (CORNER_SEGMENTS + 1)) as usize);
    for (center, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let theta = start + (i as f32 / CORNER_SEGMENTS as f32) * FRAC_PI_2;
            points.push(center + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }
    points
}

/// Triangle-list mesh built up over a frame
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Painter for Mesh {
    fn fill_triangle_colored(&mut self, corners: [Vec2; 3], colors: [Color; 3]) {
        for (p, c) in corners.into_iter().zip(colors) {
            self.vertices.push(Vertex::new(p.x, p.y, c));
        }
    }

    fn fill_round_rect(&mut self, min: Vec2, size: Vec2, radius: f32, color: Color) -> bool {
        let outline = rounded_rect_outline(min, size, radius);
        let center = min + size / 2.0;
        for (i, &a) in outline.iter().enumerate() {
            let b = outline[(i + 1) % outline.len()];
            self.fill_triangle(center, a, b, color);
        }
        true
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices.extend(circle(center, radius, color, 16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_records_three_vertices_per_triangle() {
        let mut mesh = Mesh::new();
        mesh.fill_rect(Vec2::ZERO, Vec2::new(10.0, 5.0), [1.0; 4]);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        mesh.clear();
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn test_mesh_supports_round_rect() {
        let mut mesh = Mesh::new();
        assert!(mesh.fill_round_rect(Vec2::ZERO, Vec2::new(28.0, 42.0), 10.0, [1.0; 4]));
        assert_eq!(mesh.triangle_count(), 4 * (CORNER_SEGMENTS as usize + 1));
    }

    #[test]
    fn test_rounded_outline_stays_inside_bounds() {
        let min = Vec2::new(5.0, 5.0);
        let size = Vec2::new(28.0, 42.0);
        for p in rounded_rect_outline(min, size, 10.0) {
            assert!(p.x >= min.x - 1e-3 && p.x <= min.x + size.x + 1e-3);
            assert!(p.y >= min.y - 1e-3 && p.y <= min.y + size.y + 1e-3);
        }
    }

    #[test]
    fn test_circle_segments() {
        assert_eq!(circle(Vec2::ZERO, 4.0, [1.0; 4], 16).len(), 48);
    }
}
