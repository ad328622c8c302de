//! Camera state and the matrices it feeds to the renderer backends

use crate::rasterizer::{Mat4, Vec3};

/// Orbit-style camera: a position plus yaw/pitch angles in degrees.
/// Produces the view and projection matrices composed by the render drivers
/// and the basis vectors used for ray generation.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Yaw in degrees; 0 looks down -Z
    pub theta: f32,
    /// Pitch in degrees; positive looks up
    pub phi: f32,
    pub aspect: f32,
    /// Vertical field of view in degrees
    pub angle_of_view: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            theta: 0.0,
            phi: 0.0,
            aspect,
            angle_of_view: 60.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    pub fn direction(&self) -> Vec3 {
        let theta = self.theta.to_radians();
        let phi = self.phi.to_radians();
        Vec3 {
            x: theta.sin() * phi.cos(),
            y: phi.sin(),
            z: -theta.cos() * phi.cos(),
        }
    }

    pub fn right(&self) -> Vec3 {
        self.direction().cross(Vec3::UP).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.direction())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.direction(), self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            self.angle_of_view.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Vec4;

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = Camera::new(1.0);
        let d = camera.direction();
        assert!((d.x).abs() < 1e-6 && (d.y).abs() < 1e-6);
        assert!((d.z - -1.0).abs() < 1e-6);
        let r = camera.right();
        assert!((r.x - 1.0).abs() < 1e-6);
        let u = camera.up();
        assert!((u.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_ahead_projects_to_ndc_center() {
        let camera = Camera::new(1.0);
        let clip = camera.projection_matrix()
            * camera.view_matrix()
            * Vec4::from_point(Vec3::new(0.0, 0.0, 0.0));
        // Camera sits at z=2 looking at the origin
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
        assert!(clip.w > 0.0);
    }

    #[test]
    fn test_yaw_quarter_turn_faces_positive_x() {
        let mut camera = Camera::new(1.0);
        camera.theta = 90.0;
        let d = camera.direction();
        assert!((d.x - 1.0).abs() < 1e-6);
        assert!((d.z).abs() < 1e-6);
    }
}
