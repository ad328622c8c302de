//! Core types for the rasterizer

use bytemuck::{Pod, Zeroable};
use super::math::Vec3;

/// Linear RGB color (0.0-1.0 per channel), the output of shader stages
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Interpret a vector as a color, component-wise
    pub fn from_vec3(v: Vec3) -> Self {
        Self { r: v.x, g: v.y, b: v.z }
    }
}

/// Packed RGBA pixel (0-255 per channel), the concrete render target element.
/// `repr(C)` + `Pod` so a whole buffer can be handed to the image encoder as
/// raw bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl From<Color> for Rgba {
    fn from(c: Color) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(c.r),
            g: channel(c.g),
            b: channel(c.b),
            a: 255,
        }
    }
}

/// What the rasterizer requires of a vertex element: a 3D position to lift
/// into homogeneous coordinates. Everything else is opaque shading payload
/// carried through to the shader stages.
pub trait VertexData: Copy {
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_color_clamps() {
        let p = Rgba::from(Color::new(2.0, -1.0, 0.5));
        assert_eq!((p.r, p.g, p.b, p.a), (255, 0, 128, 255));
    }

    #[test]
    fn test_rgba_from_color_roundtrips_u8_values() {
        // Overlay colors are stored as float colors; converting back must
        // reproduce the exact byte values
        let c = Color::new(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);
        let p = Rgba::from(c);
        assert_eq!((p.r, p.g, p.b), (10, 10, 10));
    }
}
