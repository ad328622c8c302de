//! Renderer backends
//!
//! Each backend owns its buffers and drives a full frame: load inputs in
//! `init`, produce and save the image in `render`. The backend is picked
//! from the command line.

mod rasterizer;
mod raytracer;

pub use rasterizer::RasterizationRenderer;
pub use raytracer::RayTracingRenderer;

use crate::settings::{RendererKind, Settings};

pub trait Renderer {
    fn init(&mut self) -> anyhow::Result<()>;
    fn render(&mut self) -> anyhow::Result<()>;
}

pub fn create(settings: Settings) -> Box<dyn Renderer> {
    match settings.renderer {
        RendererKind::Rasterizer => Box::new(RasterizationRenderer::new(settings)),
        RendererKind::Raytracer => Box::new(RayTracingRenderer::new(settings)),
    }
}
