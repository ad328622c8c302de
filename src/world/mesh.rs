//! Mesh data structures consumed by the renderer backends

use serde::{Deserialize, Serialize};

use crate::rasterizer::{
    shared, Buffer, Mat4, RenderError, SharedBuffer, Vec3, VertexData,
};

/// A mesh vertex: position plus the shading payload carried through the
/// pipeline
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Ambient color term sampled by the pixel shader
    pub ambient: Vec3,
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, ambient: Vec3) -> Self {
        Self { position, normal, ambient }
    }
}

impl VertexData for MeshVertex {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// One draw call's worth of geometry: a vertex list and a triangle list
/// indexing into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// A model: named shape list plus a world transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub shapes: Vec<Shape>,
    pub translation: Vec3,
    /// Euler rotation in degrees, applied x then y then z
    pub rotation: Vec3,
    pub scale: f32,
}

impl Model {
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_scale(self.scale)
    }

    /// Build the per-shape vertex and index buffers the rasterizer binds
    pub fn shape_buffers(
        &self,
    ) -> Result<Vec<(SharedBuffer<MeshVertex>, SharedBuffer<u32>)>, RenderError> {
        self.shapes
            .iter()
            .map(|shape| {
                let vertices = Buffer::from_vec(shape.vertices.clone())?;
                let indices = Buffer::from_vec(shape.indices.clone())?;
                Ok((shared(vertices), shared(indices)))
            })
            .collect()
    }

    /// Unit cube around the origin, one color per face, used when no scene
    /// file is given
    pub fn demo_cube() -> Model {
        let positions = [
            // Front
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            // Back
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            // Top
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            // Bottom
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            // Right
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
            // Left
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ];

        let normals = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ];

        let face_colors = [
            Vec3::new(0.9, 0.2, 0.2),
            Vec3::new(0.2, 0.9, 0.2),
            Vec3::new(0.2, 0.2, 0.9),
            Vec3::new(0.9, 0.9, 0.2),
            Vec3::new(0.9, 0.2, 0.9),
            Vec3::new(0.2, 0.9, 0.9),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for face in 0..6 {
            let base = (face * 4) as u32;
            for corner in 0..4 {
                vertices.push(MeshVertex::new(
                    positions[face * 4 + corner],
                    normals[face],
                    face_colors[face],
                ));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Model {
            name: "cube".to_string(),
            shapes: vec![Shape { vertices, indices }],
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_cube_indices_are_in_range() {
        let cube = Model::demo_cube();
        for shape in &cube.shapes {
            assert_eq!(shape.indices.len() % 3, 0);
            let count = shape.vertices.len() as u32;
            assert!(shape.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn test_demo_cube_buffers() {
        let cube = Model::demo_cube();
        let buffers = cube.shape_buffers().unwrap();
        assert_eq!(buffers.len(), 1);
        let (vertices, indices) = &buffers[0];
        assert_eq!(vertices.borrow().count(), 24);
        assert_eq!(indices.borrow().count(), 36);
    }

    #[test]
    fn test_world_matrix_applies_scale_then_translation() {
        let model = Model {
            name: String::new(),
            shapes: Vec::new(),
            translation: Vec3::new(5.0, 0.0, 0.0),
            rotation: Vec3::ZERO,
            scale: 2.0,
        };
        let m = model.world_matrix();
        let v = m * crate::rasterizer::Vec4::from_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((v.x - 7.0).abs() < 1e-5);
    }
}
