//! Paintable 2D surface
//!
//! The scene is painted through this trait in screen pixels (y down). Only
//! colored triangles are required; every other primitive has a triangle-based
//! default that a surface may override with something better.

use glam::Vec2;
use std::f32::consts::TAU;

/// Straight RGBA, 0-1
pub type Color = [f32; 4];

/// Convert 0xRRGGBB to a color with the given alpha
#[inline]
pub fn hex(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color, alpha scaled
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Segments used to approximate a full ellipse
pub const ELLIPSE_SEGMENTS: u32 = 24;

pub trait Painter {
    /// Triangle with a color per corner
    fn fill_triangle_colored(&mut self, corners: [Vec2; 3], colors: [Color; 3]);

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.fill_triangle_colored([a, b, c], [color; 3]);
    }

    /// Convex quad, corners in winding order
    fn fill_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let [a, b, c, d] = corners;
        self.fill_triangle(a, b, c, color);
        self.fill_triangle(a, c, d, color);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        let max = min + size;
        self.fill_quad(
            [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            color,
        );
    }

    /// Rounded rectangle. Returns false when the surface cannot draw one,
    /// leaving the caller to fall back to `fill_rect`.
    fn fill_round_rect(&mut self, _min: Vec2, _size: Vec2, _radius: f32, _color: Color) -> bool {
        false
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        for i in 0..ELLIPSE_SEGMENTS {
            let t1 = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            let t2 = (i + 1) as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
            self.fill_triangle(
                center,
                center + Vec2::new(t1.cos(), t1.sin()) * radii,
                center + Vec2::new(t2.cos(), t2.sin()) * radii,
                color,
            );
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }

    /// Closed outline of `width` pixels around `points`
    fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color) {
        let half = width / 2.0;
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let dir = (b - a).normalize_or_zero();
            let perp = Vec2::new(-dir.y, dir.x) * half;
            // extend along the edge so corners overlap instead of notching
            let a = a - dir * half;
            let b = b + dir * half;
            self.fill_quad([a + perp, b + perp, b - perp, a - perp], color);
        }
    }

    /// Rectangle blending from `top` to `bottom`
    fn fill_vertical_gradient(&mut self, min: Vec2, size: Vec2, top: Color, bottom: Color) {
        let max = min + size;
        let tr = Vec2::new(max.x, min.y);
        let bl = Vec2::new(min.x, max.y);
        self.fill_triangle_colored([min, tr, max], [top, top, bottom]);
        self.fill_triangle_colored([min, max, bl], [top, bottom, bottom]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        triangles: usize,
    }

    impl Painter for Counter {
        fn fill_triangle_colored(&mut self, _corners: [Vec2; 3], _colors: [Color; 3]) {
            self.triangles += 1;
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x0000ff, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_round_rect_unsupported_by_default() {
        let mut painter = Counter::default();
        assert!(!painter.fill_round_rect(Vec2::ZERO, Vec2::ONE, 2.0, [1.0; 4]));
        assert_eq!(painter.triangles, 0);
    }

    #[test]
    fn test_default_primitives_triangulate() {
        let mut painter = Counter::default();
        painter.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        assert_eq!(painter.triangles, 2);
        painter.fill_circle(Vec2::ZERO, 4.0, [1.0; 4]);
        assert_eq!(painter.triangles, 2 + ELLIPSE_SEGMENTS as usize);
        painter.stroke_polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y], 2.0, [1.0; 4]);
        assert_eq!(painter.triangles, 2 + ELLIPSE_SEGMENTS as usize + 6);
    }
}
