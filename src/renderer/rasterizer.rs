//! Rasterization render driver: wires scene, camera, and buffers into the
//! generic rasterizer and runs the clear/draw/save sequence for one frame.

use anyhow::Context;

use super::Renderer;
use crate::camera::Camera;
use crate::rasterizer::{
    shared, Buffer, Color, Rasterizer, Rgba, SharedBuffer, DEFAULT_DEPTH,
};
use crate::settings::Settings;
use crate::utils::{save_image, Timer};
use crate::window;
use crate::world::{self, MeshVertex, Model};

pub struct RasterizationRenderer {
    settings: Settings,
    rasterizer: Rasterizer<MeshVertex, Rgba>,
    model: Option<Model>,
    camera: Option<Camera>,
    render_target: Option<SharedBuffer<Rgba>>,
}

impl RasterizationRenderer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            rasterizer: Rasterizer::new(),
            model: None,
            camera: None,
            render_target: None,
        }
    }
}

impl Renderer for RasterizationRenderer {
    fn init(&mut self) -> anyhow::Result<()> {
        let model = match &self.settings.scene {
            Some(path) => world::load_scene(path)
                .with_context(|| format!("loading scene {}", path.display()))?,
            None => Model::demo_cube(),
        };
        log::info!("scene '{}': {} shape(s)", model.name, model.shapes.len());

        self.rasterizer
            .set_viewport(self.settings.width, self.settings.height)?;
        let render_target = shared(Buffer::new_2d(self.settings.width, self.settings.height)?);
        let depth_buffer = shared(Buffer::new_2d(self.settings.width, self.settings.height)?);
        self.rasterizer
            .set_render_target(Some(render_target.clone()), Some(depth_buffer));

        self.render_target = Some(render_target);
        self.camera = Some(self.settings.camera());
        self.model = Some(model);
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let model = self.model.as_ref().context("renderer not initialized")?;
        let camera = self.camera.as_ref().context("renderer not initialized")?;
        let render_target = self
            .render_target
            .as_ref()
            .context("renderer not initialized")?;

        let matrix = camera.projection_matrix() * camera.view_matrix() * model.world_matrix();
        self.rasterizer
            .set_vertex_shader(move |vertex, data| (matrix * vertex, data));
        self.rasterizer
            .set_pixel_shader(|data, _depth| Color::from_vec3(data.ambient));

        {
            let _clear = Timer::new("clear");
            self.rasterizer
                .clear_render_target(Rgba::from(Color::BLUE), DEFAULT_DEPTH)?;
        }

        {
            let _draw = Timer::new("draw");
            for (vertex_buffer, index_buffer) in model.shape_buffers()? {
                let num_vertices = index_buffer.borrow().count();
                self.rasterizer.set_vertex_buffer(vertex_buffer);
                self.rasterizer.set_index_buffer(index_buffer);
                self.rasterizer.draw(num_vertices, 0)?;
            }
        }

        {
            let _save = Timer::new("save");
            save_image(&render_target.borrow(), &self.settings.result_path)?;
        }
        log::info!("wrote {}", self.settings.result_path.display());

        if self.settings.preview {
            let pixels = render_target.borrow().as_bytes().to_vec();
            window::show(
                format!("charcoal - {}", self.settings.result_path.display()),
                self.settings.width,
                self.settings.height,
                pixels,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_demo_cube_frame_renders_and_saves() {
        let result_path = std::env::temp_dir().join("charcoal_test_frame.png");
        let settings = Settings::parse_from([
            "charcoal-renderer",
            "--width",
            "64",
            "--height",
            "64",
            "--result-path",
            result_path.to_str().unwrap(),
        ]);

        let mut renderer = RasterizationRenderer::new(settings);
        renderer.init().unwrap();
        renderer.render().unwrap();

        assert!(result_path.exists());
        std::fs::remove_file(&result_path).unwrap();
    }

    #[test]
    fn test_render_before_init_fails() {
        let settings = Settings::parse_from(["charcoal-renderer"]);
        let mut renderer = RasterizationRenderer::new(settings);
        assert!(renderer.render().is_err());
    }
}
