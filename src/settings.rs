//! Command-line settings shared by the renderer backends

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    /// CPU triangle rasterizer
    Rasterizer,
    /// Ray-tracing backend (stub: miss shader only)
    Raytracer,
}

/// Offline CPU software renderer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Settings {
    /// Rendering backend
    #[arg(long, value_enum, default_value = "rasterizer")]
    pub renderer: RendererKind,

    /// Output image width in pixels
    #[arg(long, default_value_t = 1920)]
    pub width: usize,

    /// Output image height in pixels
    #[arg(long, default_value_t = 1080)]
    pub height: usize,

    /// Where to write the rendered image (format from the extension)
    #[arg(long, default_value = "result.png")]
    pub result_path: PathBuf,

    /// RON scene file; the built-in demo cube is rendered when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Camera position
    #[arg(long, default_value_t = 0.0)]
    pub camera_x: f32,
    #[arg(long, default_value_t = 0.0)]
    pub camera_y: f32,
    #[arg(long, default_value_t = 4.0)]
    pub camera_z: f32,

    /// Camera yaw in degrees
    #[arg(long, default_value_t = 0.0)]
    pub camera_theta: f32,

    /// Camera pitch in degrees
    #[arg(long, default_value_t = 0.0)]
    pub camera_phi: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub camera_fov: f32,

    #[arg(long, default_value_t = 0.1)]
    pub camera_near: f32,

    #[arg(long, default_value_t = 100.0)]
    pub camera_far: f32,

    /// Show the finished frame in a window after saving
    #[arg(long)]
    pub preview: bool,
}

impl Settings {
    /// Build the camera described by the command line, with the viewport's
    /// aspect ratio
    pub fn camera(&self) -> crate::camera::Camera {
        let mut camera = crate::camera::Camera::new(self.width as f32 / self.height as f32);
        camera.position = crate::rasterizer::Vec3::new(self.camera_x, self.camera_y, self.camera_z);
        camera.theta = self.camera_theta;
        camera.phi = self.camera_phi;
        camera.angle_of_view = self.camera_fov;
        camera.z_near = self.camera_near;
        camera.z_far = self.camera_far;
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let settings = Settings::parse_from(["charcoal-renderer"]);
        assert_eq!(settings.renderer, RendererKind::Rasterizer);
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1080);
        assert!(settings.scene.is_none());
        assert!(!settings.preview);
    }

    #[test]
    fn test_camera_from_settings() {
        let settings = Settings::parse_from([
            "charcoal-renderer",
            "--width",
            "800",
            "--height",
            "400",
            "--camera-z",
            "10",
            "--camera-theta",
            "45",
        ]);
        let camera = settings.camera();
        assert!((camera.aspect - 2.0).abs() < 1e-6);
        assert!((camera.position.z - 10.0).abs() < 1e-6);
        assert!((camera.theta - 45.0).abs() < 1e-6);
    }
}
